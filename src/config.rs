//! Game Configuration
//!
//! Command-line arguments plus environment overrides, resolved into a
//! validated [`GameConfig`] before any game state exists.

use clap::Parser;
use thiserror::Error;

use crate::core::moves::{ConfigurationError, MoveSet};
use crate::session::controller::RoundOptions;
use crate::session::state::SessionError;

/// Environment variable holding the log filter (e.g. `debug`, `fair_rps=info`).
pub const LOG_ENV: &str = "FAIR_RPS_LOG";

/// Environment variable enabling the JSON transcript (`true` / `1`).
pub const TRANSCRIPT_ENV: &str = "FAIR_RPS_TRANSCRIPT";

/// Log filter used when neither flag nor environment set one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Exit status for a rejected move list.
pub const EXIT_CONFIG: u8 = 2;

/// Exit status for any other fatal error.
pub const EXIT_FAILURE: u8 = 1;

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "fair-rps")]
#[command(about = "Play rock-paper-scissors with any odd number of moves against a committed opponent")]
pub struct Cli {
    /// Move names in cycle order (odd count, at least 3, all distinct)
    #[arg(value_name = "MOVES")]
    pub moves: Vec<String>,

    /// Print a JSON transcript of the round after the key is disclosed
    #[arg(long)]
    pub transcript: bool,

    /// Log filter for stderr output (overrides FAIR_RPS_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

/// Resolved, validated configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Validated move list.
    pub moves: MoveSet,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Print the JSON transcript after disclosure.
    pub print_transcript: bool,
}

impl GameConfig {
    /// Build from parsed arguments and the process environment.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigurationError> {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    /// Build from parsed arguments and an environment lookup.
    ///
    /// Flags win over environment values, which win over defaults.
    pub fn resolve<F>(cli: Cli, env: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let moves = MoveSet::new(cli.moves)?;

        let log_filter = cli
            .log_level
            .or_else(|| env(LOG_ENV))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let print_transcript = cli.transcript
            || env(TRANSCRIPT_ENV)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false);

        Ok(Self { moves, log_filter, print_transcript })
    }

    /// Per-round options derived from this config.
    pub fn round_options(&self) -> RoundOptions {
        RoundOptions { print_transcript: self.print_transcript }
    }
}

/// Usage text printed when the move list is rejected.
pub fn usage(program: &str) -> String {
    format!(
        "Invalid input. Please provide an odd number (at least 3) of non-repeating move names.\n\
         Example: {program} rock paper scissors\n\
         Example: {program} rock paper scissors lizard spock"
    )
}

/// Fatal errors in the `fair-rps` binary.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Move list rejected before the round started.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Tracing subscriber could not be installed.
    #[error("failed to set tracing subscriber: {0}")]
    Logging(String),

    /// Round aborted by an entropy or I/O failure.
    #[error("round failed: {0}")]
    Session(#[from] SessionError),
}

impl StartupError {
    /// Process exit status.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => EXIT_CONFIG,
            Self::Logging(_) | Self::Session(_) => EXIT_FAILURE,
        }
    }

    /// Text for stderr. A rejected move list also gets the usage text.
    pub fn report(&self, program: &str) -> String {
        match self {
            Self::Configuration(err) => format!("{err}\n{}", usage(program)),
            other => format!("Error: {other}"),
        }
    }
}
