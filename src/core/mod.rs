//! Core primitives.
//!
//! Move sets, keyed hashing and secure randomness. Everything above
//! (rules, commitments, sessions) is built from these.

pub mod moves;
pub mod rng;
pub mod hash;

// Re-export core types
pub use moves::{MoveSet, MoveIndex, ConfigurationError, MIN_MOVES};
pub use rng::{SecureRng, EntropyUnavailableError, KEY_BYTES};
pub use hash::{hmac_sha256, hmac_sha256_hex, verify_hmac_hex, MacTag};
