//! Verification API
//!
//! The player-side check behind `fair-rps-verify`: recompute the HMAC from a
//! disclosed key and move, or re-check a saved round transcript.

use thiserror::Error;

use crate::core::hash::hmac_sha256_hex;
use crate::proof::commitment::verify_commitment;
use crate::proof::transcript::{RoundTranscript, TranscriptError};

/// Exit status when the disclosure checks out.
pub const EXIT_MATCH: u8 = 0;

/// Exit status when the disclosure does not reproduce the digest.
pub const EXIT_MISMATCH: u8 = 1;

/// Exit status when the check could not be run at all.
pub const EXIT_USAGE: u8 = 2;

/// What to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyRequest {
    /// Published digest plus the disclosed key and move.
    Disclosure {
        /// Disclosed key (hex text).
        key: String,
        /// Disclosed opponent move.
        move_name: String,
        /// Digest published before the player moved.
        hmac: String,
    },
    /// JSON transcript written by `fair-rps --transcript`.
    Transcript(String),
}

impl VerifyRequest {
    /// Build a request from optional command-line parts.
    ///
    /// A transcript wins; otherwise all three of key, move and hmac are needed.
    pub fn from_parts(
        key: Option<String>,
        move_name: Option<String>,
        hmac: Option<String>,
        transcript_json: Option<String>,
    ) -> Result<Self, VerifyError> {
        if let Some(json) = transcript_json {
            return Ok(Self::Transcript(json));
        }
        match (key, move_name, hmac) {
            (Some(key), Some(move_name), Some(hmac)) => Ok(Self::Disclosure { key, move_name, hmac }),
            _ => Err(VerifyError::MissingArguments),
        }
    }
}

/// Result of a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The disclosure reproduces the published digest.
    Match,
    /// Recomputed HMAC differs from the published one.
    DigestMismatch {
        /// Digest as published (normalized to lowercase).
        published: String,
        /// Digest recomputed from the disclosure.
        computed: String,
    },
    /// Transcript failed its self-check.
    TranscriptMismatch(TranscriptError),
}

impl VerifyOutcome {
    /// Did verification pass?
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.is_match() {
            EXIT_MATCH
        } else {
            EXIT_MISMATCH
        }
    }

    /// Text printed to stdout.
    pub fn report(&self) -> String {
        match self {
            Self::Match => "OK".to_string(),
            Self::DigestMismatch { published, computed } => {
                format!("MISMATCH\npublished: {published}\ncomputed:  {computed}")
            }
            Self::TranscriptMismatch(err) => format!("MISMATCH: {err}"),
        }
    }
}

/// The check could not be run.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Neither a transcript nor a full key/move/hmac triple was given.
    #[error("either --transcript or all of --key, --move and --hmac are required")]
    MissingArguments,

    /// Transcript JSON could not be parsed.
    #[error("invalid transcript: {0}")]
    Transcript(#[from] serde_json::Error),
}

impl VerifyError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        EXIT_USAGE
    }
}

/// Run a verification request.
pub fn verify(request: &VerifyRequest) -> Result<VerifyOutcome, VerifyError> {
    match request {
        VerifyRequest::Disclosure { key, move_name, hmac } => {
            if verify_commitment(hmac, key, move_name) {
                Ok(VerifyOutcome::Match)
            } else {
                Ok(VerifyOutcome::DigestMismatch {
                    published: hmac.trim().to_lowercase(),
                    computed: hmac_sha256_hex(key.as_bytes(), move_name.as_bytes()),
                })
            }
        }
        VerifyRequest::Transcript(json) => {
            let transcript = RoundTranscript::from_json(json)?;
            Ok(match transcript.verify() {
                Ok(()) => VerifyOutcome::Match,
                Err(err) => VerifyOutcome::TranscriptMismatch(err),
            })
        }
    }
}
