//! # Fair RPS
//!
//! Generalized rock-paper-scissors (any odd number of moves, at least three)
//! against an opponent whose move is committed with HMAC-SHA256 before the
//! player chooses.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         FAIR RPS                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                               │
//! │  ├── moves.rs    - Validated, ordered move list             │
//! │  ├── hash.rs     - HMAC-SHA256 helpers                      │
//! │  └── rng.rs      - OS-backed secure randomness              │
//! │                                                              │
//! │  game/           - Rules (pure)                              │
//! │  ├── rules.rs    - Cyclic-half rule table                    │
//! │  └── table.rs    - Help table rendering                      │
//! │                                                              │
//! │  proof/          - Fairness                                  │
//! │  ├── commitment.rs - Commit / reveal / verify                │
//! │  └── transcript.rs - JSON round record                       │
//! │                                                              │
//! │  session/        - Round orchestration                       │
//! │  ├── input.rs    - Prompt parsing                            │
//! │  ├── state.rs    - Round state machine                       │
//! │  └── controller.rs - Prompt loop                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fairness Guarantee
//!
//! The digest printed at the start of a round is
//! `HMAC-SHA256(key, opponent_move)`. The key is printed only after the
//! player's move is resolved. Recomputing the HMAC from the disclosed key
//! and move must reproduce the digest; any mismatch means the opponent
//! changed its move.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod proof;
pub mod session;

// Re-export commonly used types
pub use crate::core::moves::{MoveSet, MoveIndex, ConfigurationError};
pub use crate::core::rng::{SecureRng, EntropyUnavailableError};
pub use crate::game::rules::{RuleTable, Outcome, IndexError};
pub use crate::proof::commitment::{Commitment, Reveal, verify_commitment};
pub use crate::session::{SessionController, SessionError, InvalidSelectionError, RoundEnd};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
