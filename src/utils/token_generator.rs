//! Short token generation.
//!
//! Tokens are [`SHORT_LENGTH`] characters drawn uniformly from [`SYMBOLS`].
//! Collision resistance comes from the retry loop in
//! [`crate::application::services::ShortenerService`], not from the generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Length of every generated token.
pub const SHORT_LENGTH: usize = 10;

/// Symbol table tokens are drawn from: `a-z`, `A-Z`, digits and underscore.
///
/// Previously issued tokens were drawn from exactly these symbols, so the
/// table must not change.
pub const SYMBOLS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890_";

/// Number of distinct symbols in [`SYMBOLS`].
pub const ALPHABET_SIZE: usize = 63;

const _: () = assert!(SYMBOLS.len() == ALPHABET_SIZE);

/// Source of candidate short tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenGenerator: Send + Sync {
    /// Produces a fresh candidate token.
    fn generate(&self) -> String;
}

/// Uniform random token generator.
///
/// The RNG is seeded from OS entropy on construction, so separate processes
/// (and restarts) never replay the same token sequence.
pub struct RandomTokenGenerator {
    rng: Mutex<StdRng>,
}

impl RandomTokenGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a deterministic generator, for reproducible tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        // A poisoned RNG is still a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..SHORT_LENGTH)
            .map(|_| SYMBOLS[rng.random_range(0..SYMBOLS.len())] as char)
            .collect()
    }
}

/// Returns true if `token` has the shape of a generated token.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_token("aZ09_bY18x"));
/// assert!(!is_valid_token("too-short"));
/// ```
pub fn is_valid_token(token: &str) -> bool {
    token.len() == SHORT_LENGTH && token.bytes().all(|b| SYMBOLS.contains(&b))
}
