//! Short code generation and validation.
//!
//! Generated codes use lowercase letters and digits only; accepted codes
//! (custom or in a path) may use the full `[A-Za-z0-9]` range.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::sync::{LazyLock, Mutex, PoisonError};

/// Characters drawn by [`CodeGenerator::generate`].
const GENERATED_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Shortest accepted code.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest accepted code; also the length of the fallback candidate.
pub const MAX_CODE_LENGTH: usize = 8;

/// Path segments owned by other routes. Never treated as short codes.
pub const RESERVED_CODES: &[&str] = &["api", "healthz", "code"];

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("valid code regex"));

/// Returns true if `code` matches `^[A-Za-z0-9]{6,8}$`.
///
/// ```ignore
/// assert!(is_valid_code("abc123"));
/// assert!(!is_valid_code("abc-12"));
/// assert!(!is_valid_code("abcdefghi"));
/// ```
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Returns true if `segment` belongs to another route.
pub fn is_reserved(segment: &str) -> bool {
    RESERVED_CODES.contains(&segment)
}

/// Random short code source.
///
/// Holds its own RNG so tests can pin the sequence with [`Self::from_seed`].
/// Not cryptographically secure; codes only need to be hard to collide,
/// not hard to guess.
pub struct CodeGenerator {
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Seeds the generator from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic generator: the same seed yields the same codes.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Produces `length` characters from `[a-z0-9]`.
    pub fn generate(&self, length: usize) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..GENERATED_ALPHABET.len());
                GENERATED_ALPHABET[idx] as char
            })
            .collect()
    }

    /// Picks a candidate length uniformly from 6, 7 and 8.
    pub fn random_length(&self) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(MIN_CODE_LENGTH..=MAX_CODE_LENGTH)
    }

    /// Produces a candidate of random length in 6..=8.
    pub fn candidate(&self) -> String {
        let length = self.random_length();
        self.generate(length)
    }
}
