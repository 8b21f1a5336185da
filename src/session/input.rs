//! Prompt Input Parsing
//!
//! Turns one line typed at the move prompt into a [`Selection`].
//! Bounds are checked against the move count only.

use thiserror::Error;

use crate::core::moves::MoveIndex;

/// Input that exits without finishing the round.
pub const EXIT_INPUT: &str = "0";

/// Input that prints the outcome table.
pub const HELP_INPUT: &str = "?";

/// A recognized prompt input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Play the move at this 0-based index.
    Move(MoveIndex),
    /// Show the help table.
    Help,
    /// Abandon the round.
    Exit,
}

/// Rejected prompt input. Always recoverable: the prompt is shown again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelectionError {
    /// Nothing was typed.
    #[error("empty input")]
    Empty,

    /// Input is neither a number nor a command.
    #[error("not a number: {0:?}")]
    NotANumber(String),

    /// Number outside `1..=max`.
    #[error("{got} is not between 1 and {max}")]
    OutOfRange {
        /// Number typed.
        got: u64,
        /// Number of moves.
        max: usize,
    },
}

/// Parse a prompt line for a game with `move_count` moves.
///
/// Accepts `0`, `?` and `1..=move_count`, ignoring surrounding whitespace.
/// Numbers are 1-based on the prompt and 0-based in the result.
pub fn parse_selection(line: &str, move_count: usize) -> Result<Selection, InvalidSelectionError> {
    let input = line.trim();

    match input {
        "" => Err(InvalidSelectionError::Empty),
        EXIT_INPUT => Ok(Selection::Exit),
        HELP_INPUT => Ok(Selection::Help),
        _ => {
            if !input.bytes().all(|b| b.is_ascii_digit()) {
                return Err(InvalidSelectionError::NotANumber(input.to_string()));
            }
            let number: u64 = input.parse().map_err(|_| InvalidSelectionError::OutOfRange {
                got: u64::MAX,
                max: move_count,
            })?;
            match number {
                0 => Ok(Selection::Exit),
                n if n <= move_count as u64 => Ok(Selection::Move((n - 1) as usize)),
                n => Err(InvalidSelectionError::OutOfRange { got: n, max: move_count }),
            }
        }
    }
}
