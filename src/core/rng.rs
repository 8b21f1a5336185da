//! Secure Randomness
//!
//! All randomness in a round (secret key, opponent move) comes from a
//! cryptographically secure generator. Production code uses the operating
//! system source (`OsRng`); tests inject a seeded CSPRNG.

use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use thiserror::Error;

/// Secret key size in bytes (256 bits of entropy).
pub const KEY_BYTES: usize = 32;

/// The random source could not produce bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entropy source unavailable: {reason}")]
pub struct EntropyUnavailableError {
    /// Message from the underlying generator.
    pub reason: String,
}

impl From<rand::Error> for EntropyUnavailableError {
    fn from(err: rand::Error) -> Self {
        Self { reason: err.to_string() }
    }
}

/// Fallible wrapper over a cryptographically secure generator.
///
/// Every draw goes through `try_fill_bytes`, so an exhausted or missing
/// system source surfaces as [`EntropyUnavailableError`] instead of a panic.
#[derive(Debug, Clone, Default)]
pub struct SecureRng<R = OsRng> {
    inner: R,
}

impl SecureRng<OsRng> {
    /// Generator backed by the operating system.
    pub fn os() -> Self {
        Self { inner: OsRng }
    }
}

impl<R: RngCore + CryptoRng> SecureRng<R> {
    /// Wrap an existing CSPRNG.
    pub fn from_rng(inner: R) -> Self {
        Self { inner }
    }

    /// Fill `dest` with random bytes.
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyUnavailableError> {
        self.inner.try_fill_bytes(dest)?;
        Ok(())
    }

    /// Generate a fresh 256-bit secret key.
    pub fn secret_key(&mut self) -> Result<[u8; KEY_BYTES], EntropyUnavailableError> {
        let mut key = [0u8; KEY_BYTES];
        self.fill(&mut key)?;
        Ok(key)
    }

    /// Short-lived CSPRNG seeded from the wrapped source.
    ///
    /// Seeding goes through `try_fill_bytes`, so a failing source is
    /// reported here rather than panicking inside `rand`'s samplers.
    fn reseeded(&mut self) -> Result<StdRng, EntropyUnavailableError> {
        Ok(StdRng::from_rng(&mut self.inner)?)
    }

    /// Uniform integer in `[0, max)`. `max == 0` returns 0.
    pub fn next_index(&mut self, max: usize) -> Result<usize, EntropyUnavailableError> {
        if max <= 1 {
            return Ok(0);
        }
        Ok(self.reseeded()?.gen_range(0..max))
    }

    /// Select a random element from a slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Result<Option<&'a T>, EntropyUnavailableError> {
        if slice.is_empty() {
            return Ok(None);
        }
        Ok(slice.choose(&mut self.reseeded()?))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Generator whose source is always exhausted.
    pub(crate) struct DeadRng;

    impl RngCore for DeadRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("only try_fill_bytes is used")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("only try_fill_bytes is used")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("only try_fill_bytes is used")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("source exhausted"))
        }
    }

    impl CryptoRng for DeadRng {}

    pub(crate) fn seeded(seed: u64) -> SecureRng<StdRng> {
        SecureRng::from_rng(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_seeded_determinism() {
        let mut rng1 = seeded(12345);
        let mut rng2 = seeded(12345);

        for _ in 0..100 {
            assert_eq!(rng1.secret_key().unwrap(), rng2.secret_key().unwrap());
            assert_eq!(rng1.next_index(11).unwrap(), rng2.next_index(11).unwrap());
        }
    }

    #[test]
    fn test_secret_keys_differ() {
        let mut rng = SecureRng::os();
        let a = rng.secret_key().unwrap();
        let b = rng.secret_key().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_index_range() {
        let mut rng = seeded(1234);

        for _ in 0..1000 {
            assert!(rng.next_index(7).unwrap() < 7);
        }

        assert_eq!(rng.next_index(0).unwrap(), 0);
        assert_eq!(rng.next_index(1).unwrap(), 0);
    }

    #[test]
    fn test_next_index_covers_all_values() {
        let mut rng = seeded(42);
        let mut hits = [0u32; 5];

        for _ in 0..5000 {
            hits[rng.next_index(5).unwrap()] += 1;
        }

        // Roughly uniform: each bucket expects 1000.
        for count in hits {
            assert!((800..1200).contains(&count), "skewed bucket: {count}");
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = seeded(9);
        let items = ["rock", "paper", "scissors"];
        let picked = rng.choose(&items).unwrap().unwrap();
        assert!(items.contains(picked));

        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty).unwrap(), None);
    }

    #[test]
    fn test_dead_source_reports_error() {
        let mut rng = SecureRng::from_rng(DeadRng);
        let err = rng.secret_key().unwrap_err();
        assert!(err.reason.contains("exhausted"));
        assert!(rng.next_index(3).is_err());
        assert!(rng.choose(&["rock", "paper", "scissors"]).is_err());
    }
}
