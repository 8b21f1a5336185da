//! Rule Engine
//!
//! Winner determination for an odd cycle of moves.
//!
//! ## Cyclic-half rule
//!
//! Arrange the N moves on a circle in the order they were given. For move
//! `i`, the N/2 moves that follow it (wrapping) defeat it, and the N/2 moves
//! that precede it are the ones it beats:
//!
//! ```text
//! beats(i) = { (i + N - 1 - j) mod N : j in 0..N/2 }
//! ```
//!
//! This is the reverse of the original tool's `winning_moves`, which lists the
//! following half as the moves `i` beats.
//!
//! With N odd every move beats exactly (N-1)/2 others and loses to the
//! same number, and every pair of distinct moves has one strict winner.
//! For `[rock, paper, scissors]` this yields the familiar rules.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::moves::{ConfigurationError, MoveIndex, MoveSet};

/// Result of a pairing from the first move's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// First move wins.
    Win,
    /// First move loses.
    Lose,
    /// Same move on both sides.
    Draw,
}

impl Outcome {
    /// The same pairing seen from the other side.
    pub fn invert(self) -> Self {
        match self {
            Self::Win => Self::Lose,
            Self::Lose => Self::Win,
            Self::Draw => Self::Draw,
        }
    }

    /// Display word ("Win", "Lose", "Draw").
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Lose => "Lose",
            Self::Draw => "Draw",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup failures when resolving a pairing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Index outside `[0, N)`.
    #[error("move index {index} out of range (0..{len})")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of moves.
        len: usize,
    },

    /// Name not present in the move set.
    #[error("unknown move: {0:?}")]
    UnknownMove(String),
}

/// Precomputed "beats" relation over a [`MoveSet`].
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RuleTable {
    moves: MoveSet,
    beats: Vec<Vec<MoveIndex>>,
}

impl RuleTable {
    /// Build the table for a validated move set.
    pub fn new(moves: MoveSet) -> Self {
        let n = moves.len();
        let half = n / 2;

        let beats = (0..n)
            .map(|i| (0..half).map(|j| (i + n - 1 - j) % n).collect())
            .collect();

        Self { moves, beats }
    }

    /// The move set this table was built from.
    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    /// Always false for a table built from a validated set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    fn check(&self, index: MoveIndex) -> Result<(), IndexError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(IndexError::OutOfRange { index, len: self.len() })
        }
    }

    /// Indices beaten by `index`, nearest predecessor first.
    pub fn beats(&self, index: MoveIndex) -> Result<&[MoveIndex], IndexError> {
        self.check(index)?;
        Ok(&self.beats[index])
    }

    /// Indices that beat `index`.
    pub fn loses_to(&self, index: MoveIndex) -> Result<Vec<MoveIndex>, IndexError> {
        self.check(index)?;
        let n = self.len();
        Ok((0..n / 2).map(|j| (index + j + 1) % n).collect())
    }

    /// Resolve `a` against `b` from `a`'s perspective.
    ///
    /// Equal indices are always a draw.
    pub fn resolve(&self, a: MoveIndex, b: MoveIndex) -> Result<Outcome, IndexError> {
        self.check(a)?;
        self.check(b)?;

        if a == b {
            return Ok(Outcome::Draw);
        }
        if self.beats[a].contains(&b) {
            Ok(Outcome::Win)
        } else {
            Ok(Outcome::Lose)
        }
    }

    /// Resolve two moves by name.
    pub fn resolve_by_name(&self, a: &str, b: &str) -> Result<Outcome, IndexError> {
        let lookup = |name: &str| {
            self.moves
                .index_of(name)
                .ok_or_else(|| IndexError::UnknownMove(name.to_string()))
        };
        self.resolve(lookup(a)?, lookup(b)?)
    }

    /// Full N x N outcome grid, `grid[row][col] = resolve(row, col)`.
    pub fn outcome_grid(&self) -> Vec<Vec<Outcome>> {
        let n = self.len();
        (0..n)
            .map(|row| {
                (0..n)
                    .map(|col| {
                        if row == col {
                            Outcome::Draw
                        } else if self.beats[row].contains(&col) {
                            Outcome::Win
                        } else {
                            Outcome::Lose
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Validate raw move names and build their rule table.
///
/// Re-checks the move list even though callers normally validate first.
pub fn build_rule_table<I, S>(names: I) -> Result<RuleTable, ConfigurationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ok(RuleTable::new(MoveSet::new(names)?))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rps() -> RuleTable {
        build_rule_table(["rock", "paper", "scissors"]).unwrap()
    }

    fn rpsls() -> RuleTable {
        build_rule_table(["rock", "paper", "scissors", "lizard", "spock"]).unwrap()
    }

    fn table_of(n: usize) -> RuleTable {
        build_rule_table((0..n).map(|i| format!("m{i}"))).unwrap()
    }

    #[test]
    fn test_classic_three() {
        let table = rps();
        assert_eq!(table.resolve_by_name("rock", "scissors").unwrap(), Outcome::Win);
        assert_eq!(table.resolve_by_name("rock", "paper").unwrap(), Outcome::Lose);
        assert_eq!(table.resolve_by_name("rock", "rock").unwrap(), Outcome::Draw);
        assert_eq!(table.resolve_by_name("paper", "rock").unwrap(), Outcome::Win);
        assert_eq!(table.resolve_by_name("scissors", "paper").unwrap(), Outcome::Win);
    }

    #[test]
    fn test_five_move_cycle() {
        let table = rpsls();
        // spock (4) is followed by rock (0) and paper (1) on the cycle.
        assert_eq!(table.resolve_by_name("spock", "rock").unwrap(), Outcome::Lose);
        assert_eq!(table.resolve_by_name("spock", "paper").unwrap(), Outcome::Lose);
        assert_eq!(table.resolve_by_name("spock", "lizard").unwrap(), Outcome::Win);
        assert_eq!(table.resolve_by_name("spock", "scissors").unwrap(), Outcome::Win);
        assert_eq!(table.beats(4).unwrap(), &[3, 2]);
        assert_eq!(table.loses_to(4).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_even_count_rejected() {
        assert!(matches!(
            build_rule_table(["a", "b", "c", "d"]),
            Err(ConfigurationError::EvenMoveCount(4))
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let table = rps();
        assert_eq!(
            table.resolve(0, 3),
            Err(IndexError::OutOfRange { index: 3, len: 3 })
        );
        assert!(table.resolve(7, 0).is_err());
        assert!(table.beats(3).is_err());
    }

    #[test]
    fn test_unknown_name() {
        let table = rps();
        assert_eq!(
            table.resolve_by_name("rock", "lizard"),
            Err(IndexError::UnknownMove("lizard".into()))
        );
    }

    #[test]
    fn test_grid_matches_resolve() {
        let table = rpsls();
        let grid = table.outcome_grid();
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                assert_eq!(*cell, table.resolve(row, col).unwrap());
            }
        }
    }

    #[test]
    fn test_outcome_invert() {
        assert_eq!(Outcome::Win.invert(), Outcome::Lose);
        assert_eq!(Outcome::Lose.invert(), Outcome::Win);
        assert_eq!(Outcome::Draw.invert(), Outcome::Draw);
    }

    proptest! {
        #[test]
        fn prop_row_sums_are_balanced(k in 1usize..25) {
            let n = 2 * k + 1;
            let table = table_of(n);
            for i in 0..n {
                let wins = (0..n).filter(|&j| table.resolve(i, j).unwrap() == Outcome::Win).count();
                let losses = (0..n).filter(|&j| table.resolve(i, j).unwrap() == Outcome::Lose).count();
                prop_assert_eq!(wins, (n - 1) / 2);
                prop_assert_eq!(losses, (n - 1) / 2);
            }
        }

        #[test]
        fn prop_resolve_is_antisymmetric(k in 1usize..25, a in 0usize..51, b in 0usize..51) {
            let n = 2 * k + 1;
            let (a, b) = (a % n, b % n);
            let table = table_of(n);
            let forward = table.resolve(a, b).unwrap();
            let backward = table.resolve(b, a).unwrap();
            if a == b {
                prop_assert_eq!(forward, Outcome::Draw);
            } else {
                prop_assert_ne!(forward, Outcome::Draw);
                prop_assert_eq!(forward, backward.invert());
            }
        }

        #[test]
        fn prop_beats_and_loses_to_partition(k in 1usize..25, i in 0usize..51) {
            let n = 2 * k + 1;
            let i = i % n;
            let table = table_of(n);
            let mut all: Vec<usize> = table.beats(i).unwrap().to_vec();
            all.extend(table.loses_to(i).unwrap());
            all.push(i);
            all.sort_unstable();
            prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
        }
    }
}
