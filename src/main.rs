//! Fair RPS
//!
//! Plays one round against a committed opponent on stdin/stdout.
//! Logs go to stderr.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fair_rps::{
    config::{Cli, GameConfig, StartupError, DEFAULT_LOG_FILTER},
    core::rng::SecureRng,
    game::rules::RuleTable,
    session::{RoundEnd, SessionController},
    VERSION,
};

const PROGRAM: &str = "fair-rps";

fn main() -> ExitCode {
    match start(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err, StartupError::Session(_)) {
                error!("{err}");
            }
            eprintln!("{}", err.report(PROGRAM));
            ExitCode::from(err.exit_code())
        }
    }
}

fn start(cli: Cli) -> Result<(), StartupError> {
    let config = GameConfig::from_cli(cli)?;
    init_logging(&config.log_filter)?;
    run(config)
}

fn init_logging(filter: &str) -> Result<(), StartupError> {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| StartupError::Logging(e.to_string()))
}

fn run(config: GameConfig) -> Result<(), StartupError> {
    info!("Fair RPS v{}", VERSION);
    info!("Moves: {}", config.moves.len());

    let options = config.round_options();
    let rules = RuleTable::new(config.moves);
    let mut rng = SecureRng::os();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut controller = SessionController::new(&rules, stdin.lock(), stdout.lock(), options);

    match controller.play_round(&mut rng)? {
        RoundEnd::Disclosed { result, .. } => {
            info!(outcome = %result.outcome, "round complete");
        }
        RoundEnd::Abandoned => {}
    }
    Ok(())
}
