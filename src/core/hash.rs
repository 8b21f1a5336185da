//! Keyed Hashing
//!
//! HMAC-SHA256 helpers used by the commitment protocol.
//! Digests travel as lowercase hex so a player can compare them by eye
//! or recompute them with any off-the-shelf HMAC tool.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Raw HMAC-SHA256 output (256 bits / 32 bytes).
pub type MacTag = [u8; 32];

/// Length of a hex-encoded [`MacTag`].
pub const MAC_HEX_LEN: usize = 64;

fn keyed(key: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(key).expect("hmac accepts any key length")
}

/// Compute HMAC-SHA256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> MacTag {
    let mut mac = keyed(key);
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Compute HMAC-SHA256 and return it hex-encoded (lowercase).
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> String {
    hex::encode(hmac_sha256(key, message))
}

/// Check a hex digest against `HMAC-SHA256(key, message)`.
///
/// Case-insensitive on the hex input. The tag comparison is constant-time.
/// Malformed hex (wrong length, non-hex characters) never matches.
pub fn verify_hmac_hex(key: &[u8], message: &[u8], expected_hex: &str) -> bool {
    let expected_hex = expected_hex.trim();
    if expected_hex.len() != MAC_HEX_LEN {
        return false;
    }
    let Ok(expected) = hex::decode(expected_hex) else {
        return false;
    };

    let mut mac = keyed(key);
    mac.update(message);
    mac.verify_slice(&expected).is_ok()
}

// =============================================================================
// TESTS
// =============================================================================
