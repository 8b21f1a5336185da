//! Fairness Proofs
//!
//! Lets the player check, after the fact, that the opponent did not
//! change its move:
//! - HMAC commitment published before the player chooses
//! - Key disclosure and recomputation after the round
//! - Optional JSON transcript of the whole round
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF SYSTEM                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  commitment.rs   - Commit / reveal / verify                 │
//! │  transcript.rs   - Round record with self-check             │
//! │  verify.rs       - Player-side check and exit statuses      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod commitment;
pub mod transcript;
pub mod verify;

// Re-export key types
pub use commitment::{commit, verify_commitment, Commitment, Reveal, SecretKey};
pub use transcript::{RoundTranscript, TranscriptError, TRANSCRIPT_VERSION};
pub use verify::{verify, VerifyError, VerifyOutcome, VerifyRequest};
