//! Round Transcript
//!
//! Machine-readable record of a finished round. Holds everything needed to
//! re-run the verification step and re-resolve the outcome offline.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::core::moves::MoveSet;
use crate::game::rules::{Outcome, RuleTable};
use crate::proof::commitment::{verify_commitment, Reveal};

/// Current transcript version.
pub const TRANSCRIPT_VERSION: u8 = 1;

/// Record of one disclosed round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundTranscript {
    /// Version for forward compatibility.
    pub version: u8,
    /// Unique round identifier.
    pub round_id: Uuid,
    /// When the commitment was published.
    pub started_at: DateTime<Utc>,
    /// Ordered move list the round was played with.
    pub moves: MoveSet,
    /// Digest published before the player chose.
    pub digest: String,
    /// Disclosed key and opponent move.
    pub reveal: Reveal,
    /// Player's move name.
    pub human_move: String,
    /// Outcome from the player's perspective.
    pub outcome: Outcome,
}

/// Reasons a transcript fails its self-check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    /// Disclosed key/move do not reproduce the digest.
    #[error("digest does not match disclosed key and move")]
    DigestMismatch,
    /// A move name is not part of the move list.
    #[error("unknown move in transcript: {0:?}")]
    UnknownMove(String),
    /// Recorded outcome disagrees with the rules.
    #[error("recorded outcome {recorded} but rules give {computed}")]
    OutcomeMismatch {
        /// Outcome stored in the transcript.
        recorded: Outcome,
        /// Outcome recomputed from the move list.
        computed: Outcome,
    },
}

impl RoundTranscript {
    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Re-run the fairness check and the outcome resolution.
    pub fn verify(&self) -> Result<(), TranscriptError> {
        if !verify_commitment(&self.digest, self.reveal.key.as_str(), &self.reveal.move_name) {
            return Err(TranscriptError::DigestMismatch);
        }

        let rules = RuleTable::new(self.moves.clone());
        let computed = rules
            .resolve_by_name(&self.human_move, &self.reveal.move_name)
            .map_err(|_| {
                let missing = if self.moves.index_of(&self.human_move).is_none() {
                    &self.human_move
                } else {
                    &self.reveal.move_name
                };
                TranscriptError::UnknownMove(missing.clone())
            })?;

        if computed != self.outcome {
            return Err(TranscriptError::OutcomeMismatch {
                recorded: self.outcome,
                computed,
            });
        }
        Ok(())
    }
}
