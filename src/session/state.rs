//! Round State Machine
//!
//! ```text
//! AwaitingCommit ──commit──▶ AwaitingHumanMove ──select──▶ Resolved ──disclose──▶ Disclosed
//! ```
//!
//! Each transition checks the current state and fails with
//! [`SessionError::InvalidTransition`] when called out of order.
//! The secret key only leaves the state machine through `disclose`.

use chrono::{DateTime, Utc};
use rand::{CryptoRng, RngCore};
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::moves::MoveIndex;
use crate::core::rng::{EntropyUnavailableError, SecureRng};
use crate::game::rules::{IndexError, Outcome, RuleTable};
use crate::proof::commitment::{commit, Commitment, Reveal};
use crate::proof::transcript::{RoundTranscript, TRANSCRIPT_VERSION};

/// Phase of a round, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Opponent has not committed yet.
    AwaitingCommit,
    /// Digest published, waiting for the player.
    AwaitingHumanMove,
    /// Outcome computed, key still private.
    Resolved,
    /// Key disclosed. Terminal.
    Disclosed,
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AwaitingCommit => "AwaitingCommit",
            Self::AwaitingHumanMove => "AwaitingHumanMove",
            Self::Resolved => "Resolved",
            Self::Disclosed => "Disclosed",
        };
        f.write_str(name)
    }
}

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Transition attempted from the wrong phase.
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        /// Phase the round was in.
        from: RoundPhase,
        /// Attempted transition.
        action: &'static str,
    },

    /// Random source failed during commit.
    #[error(transparent)]
    Entropy(#[from] EntropyUnavailableError),

    /// Move index outside the rule table.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Prompt I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Player's move (0-based).
    pub human_move: MoveIndex,
    /// Opponent's move (0-based).
    pub opponent_move: MoveIndex,
    /// Outcome from the player's perspective.
    pub outcome: Outcome,
}

/// Round state with the data each phase owns.
#[derive(Debug, Clone)]
pub enum RoundState {
    /// Nothing chosen yet.
    AwaitingCommit,
    /// Opponent move committed.
    AwaitingHumanMove {
        /// Commitment whose digest has been published.
        commitment: Commitment,
    },
    /// Player move received and resolved.
    Resolved {
        /// Still-sealed commitment.
        commitment: Commitment,
        /// Resolved pairing.
        result: RoundResult,
    },
    /// Key and opponent move disclosed.
    Disclosed {
        /// Published digest.
        digest: String,
        /// Disclosed key and move.
        reveal: Reveal,
        /// Resolved pairing.
        result: RoundResult,
    },
}

impl RoundState {
    /// Phase tag for this state.
    pub fn phase(&self) -> RoundPhase {
        match self {
            Self::AwaitingCommit => RoundPhase::AwaitingCommit,
            Self::AwaitingHumanMove { .. } => RoundPhase::AwaitingHumanMove,
            Self::Resolved { .. } => RoundPhase::Resolved,
            Self::Disclosed { .. } => RoundPhase::Disclosed,
        }
    }
}

/// One round against the committed opponent.
pub struct Round<'a> {
    id: Uuid,
    rules: &'a RuleTable,
    state: RoundState,
    started_at: Option<DateTime<Utc>>,
}

impl<'a> Round<'a> {
    /// Fresh round in `AwaitingCommit`.
    pub fn new(rules: &'a RuleTable) -> Self {
        Self {
            id: Uuid::new_v4(),
            rules,
            state: RoundState::AwaitingCommit,
            started_at: None,
        }
    }

    /// Round identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        self.state.phase()
    }

    /// Borrow the full state.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition { from: self.phase(), action }
    }

    /// Pick the opponent move uniformly at random and commit to it.
    ///
    /// Returns the digest to publish.
    pub fn commit<R>(&mut self, rng: &mut SecureRng<R>) -> Result<String, SessionError>
    where
        R: RngCore + CryptoRng,
    {
        if self.phase() != RoundPhase::AwaitingCommit {
            return Err(self.invalid("commit"));
        }

        let rules = self.rules;
        let moves = rules.moves();
        let opponent = rng.next_index(moves.len())?;
        let name = moves
            .name(opponent)
            .ok_or(IndexError::OutOfRange { index: opponent, len: moves.len() })?;
        let commitment = commit(rng, opponent, name)?;
        let digest = commitment.digest().to_string();

        debug!(round = %self.id, digest = %digest, "opponent move committed");
        self.started_at = Some(Utc::now());
        self.state = RoundState::AwaitingHumanMove { commitment };
        Ok(digest)
    }

    /// Published digest, once committed.
    pub fn digest(&self) -> Option<&str> {
        match &self.state {
            RoundState::AwaitingCommit => None,
            RoundState::AwaitingHumanMove { commitment }
            | RoundState::Resolved { commitment, .. } => Some(commitment.digest()),
            RoundState::Disclosed { digest, .. } => Some(digest),
        }
    }

    /// Accept the player's move and resolve the round.
    pub fn select(&mut self, human_move: MoveIndex) -> Result<RoundResult, SessionError> {
        let RoundState::AwaitingHumanMove { commitment } = &self.state else {
            return Err(self.invalid("select a move"));
        };

        let opponent_move = commitment.reveal().move_index;
        let outcome = self.rules.resolve(human_move, opponent_move)?;
        let result = RoundResult { human_move, opponent_move, outcome };
        let commitment = commitment.clone();

        self.state = RoundState::Resolved { commitment, result };

        info!(round = %self.id, outcome = %outcome, "round resolved");
        Ok(result)
    }

    /// Disclose the key and opponent move.
    ///
    /// Calling again once disclosed returns the same values.
    pub fn disclose(&mut self) -> Result<Reveal, SessionError> {
        let (commitment, result) = match &self.state {
            RoundState::Disclosed { reveal, .. } => return Ok(reveal.clone()),
            RoundState::Resolved { commitment, result } => (commitment, *result),
            _ => return Err(self.invalid("disclose")),
        };

        let reveal = commitment.reveal();
        let digest = commitment.digest().to_string();
        self.state = RoundState::Disclosed {
            digest,
            reveal: reveal.clone(),
            result,
        };

        debug!(round = %self.id, "key disclosed");
        Ok(reveal)
    }

    /// Transcript of a disclosed round.
    pub fn transcript(&self) -> Option<RoundTranscript> {
        let RoundState::Disclosed { digest, reveal, result } = &self.state else {
            return None;
        };
        let moves = self.rules.moves();

        Some(RoundTranscript {
            version: TRANSCRIPT_VERSION,
            round_id: self.id,
            started_at: self.started_at.unwrap_or_else(Utc::now),
            moves: moves.clone(),
            digest: digest.clone(),
            reveal: reveal.clone(),
            human_move: moves.name(result.human_move)?.to_string(),
            outcome: result.outcome,
        })
    }
}
