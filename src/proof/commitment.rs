//! Move Commitment Protocol
//!
//! The opponent commits to its move before the player chooses, and
//! reveals the key once the round resolves.
//!
//! ## Protocol
//!
//! 1. Draw a fresh 256-bit key, hex encode it (64 chars).
//! 2. Publish `digest = hex(HMAC-SHA256(key, move_name))`, where the HMAC key
//!    is the ASCII text of the hex key.
//! 3. After the round, disclose the key and the move name.
//! 4. Anyone can verify by recomputing the HMAC from the disclosed pair
//!    and comparing it with the published digest ([`verify_commitment`]).
//!
//! Changing the move after step 2 would require finding a second key/move
//! pair with the same HMAC.

use serde::{Serialize, Deserialize};

use crate::core::hash::{hmac_sha256_hex, verify_hmac_hex};
use crate::core::moves::MoveIndex;
use crate::core::rng::{EntropyUnavailableError, SecureRng};

/// Hex-encoded secret key for a single round.
///
/// `Debug` is redacted so the key cannot leak through logs before reveal.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    /// Draw a fresh key from `rng`.
    pub fn generate<R>(rng: &mut SecureRng<R>) -> Result<Self, EntropyUnavailableError>
    where
        R: rand::RngCore + rand::CryptoRng,
    {
        Ok(Self(hex::encode(rng.secret_key()?)))
    }

    /// Wrap an already-encoded key (e.g. one typed in for verification).
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Key text as disclosed to the player.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bytes fed to HMAC (the ASCII of the hex text).
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// A committed opponent move.
///
/// The digest is public from creation; the key and move stay private
/// until [`Commitment::reveal`].
#[derive(Clone, Debug)]
pub struct Commitment {
    digest: String,
    key: SecretKey,
    move_index: MoveIndex,
    move_name: String,
}

impl Commitment {
    /// Commit to a move under an explicit key.
    pub fn with_key(key: SecretKey, move_index: MoveIndex, move_name: &str) -> Self {
        let digest = hmac_sha256_hex(key.as_bytes(), move_name.as_bytes());
        Self {
            digest,
            key,
            move_index,
            move_name: move_name.to_string(),
        }
    }

    /// Published digest (lowercase hex).
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Disclose the key and committed move.
    ///
    /// Idempotent: repeated calls return identical values.
    pub fn reveal(&self) -> Reveal {
        Reveal {
            key: self.key.clone(),
            move_index: self.move_index,
            move_name: self.move_name.clone(),
        }
    }
}

/// Disclosed half of a commitment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    /// Secret key used for the digest.
    pub key: SecretKey,
    /// Committed move (0-based).
    pub move_index: MoveIndex,
    /// Committed move name (the HMAC message).
    pub move_name: String,
}

impl Reveal {
    /// Check this reveal against a published digest.
    pub fn verify(&self, digest: &str) -> bool {
        verify_commitment(digest, self.key.as_str(), &self.move_name)
    }
}

/// Commit to `move_name` with a freshly generated key.
pub fn commit<R>(
    rng: &mut SecureRng<R>,
    move_index: MoveIndex,
    move_name: &str,
) -> Result<Commitment, EntropyUnavailableError>
where
    R: rand::RngCore + rand::CryptoRng,
{
    let key = SecretKey::generate(rng)?;
    Ok(Commitment::with_key(key, move_index, move_name))
}

/// Verification step: does `HMAC-SHA256(key, move_name)` equal `digest`?
///
/// `key` is the disclosed hex text, used verbatim as the HMAC key.
pub fn verify_commitment(digest: &str, key: &str, move_name: &str) -> bool {
    verify_hmac_hex(key.as_bytes(), move_name.as_bytes(), digest)
}
