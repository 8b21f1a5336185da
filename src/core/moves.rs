//! Move Set
//!
//! The ordered, immutable list of move names a game is played with.
//! Order defines adjacency on the cycle used by the rule engine.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Smallest playable move count.
pub const MIN_MOVES: usize = 3;

/// Errors raised while validating a move list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Fewer than [`MIN_MOVES`] moves supplied.
    #[error("at least {min} moves are required, got {got}")]
    TooFewMoves {
        /// Required minimum.
        min: usize,
        /// Number supplied.
        got: usize,
    },

    /// An even number of moves cannot form a fair cycle.
    #[error("the number of moves must be odd, got {0}")]
    EvenMoveCount(usize),

    /// The same name appears more than once.
    #[error("duplicate move: {0:?}")]
    DuplicateMove(String),

    /// A move name is empty or whitespace only.
    #[error("move names must not be empty (position {0})")]
    EmptyMoveName(usize),
}

/// Index of a move inside a [`MoveSet`] (0-based).
pub type MoveIndex = usize;

/// Ordered list of distinct move names.
///
/// Invariants (checked by [`MoveSet::new`]):
/// - length is odd and at least [`MIN_MOVES`]
/// - names are unique (case-sensitive)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MoveSet {
    names: Vec<String>,
}

impl MoveSet {
    /// Validate and build a move set.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.len() < MIN_MOVES {
            return Err(ConfigurationError::TooFewMoves {
                min: MIN_MOVES,
                got: names.len(),
            });
        }
        if names.len() % 2 == 0 {
            return Err(ConfigurationError::EvenMoveCount(names.len()));
        }

        let mut seen = BTreeSet::new();
        for (position, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigurationError::EmptyMoveName(position + 1));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigurationError::DuplicateMove(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Number of moves (N).
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a validated set; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the move at `index`, if in range.
    pub fn name(&self, index: MoveIndex) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of a move by exact name.
    pub fn index_of(&self, name: &str) -> Option<MoveIndex> {
        self.names.iter().position(|n| n == name)
    }

    /// Iterate over move names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Borrow the names as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl TryFrom<Vec<String>> for MoveSet {
    type Error = ConfigurationError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<MoveSet> for Vec<String> {
    fn from(set: MoveSet) -> Self {
        set.names
    }
}
