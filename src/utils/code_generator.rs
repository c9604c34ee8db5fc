//! Short code generation.
//!
//! Codes are drawn from the 62-character alphanumeric alphabet (26 lowercase,
//! 26 uppercase, 10 digits), one uniform character at a time, from a CSPRNG
//! seeded with OS entropy. The generator never checks the store for prior
//! existence of a code; uniqueness is enforced by the `links.code` unique
//! constraint at insert time.

use rand::{Rng, SeedableRng, distr::Alphanumeric, rngs::StdRng};
use rand_core::{OsRng, TryRngCore};

/// Size of the code alphabet (`[a-zA-Z0-9]`).
pub const ALPHABET_SIZE: usize = 62;

/// Error raised when the system random source cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum CodeGenError {
    #[error("system random source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Generates a random alphanumeric code of exactly `length` characters.
///
/// Each character is sampled uniformly from the 62-character alphabet.
///
/// # Errors
///
/// Returns [`CodeGenError::EntropyUnavailable`] if OS entropy cannot be read.
pub fn generate_code(length: usize) -> Result<String, CodeGenError> {
    let mut seed = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut seed)
        .map_err(|e| CodeGenError::EntropyUnavailable(e.to_string()))?;

    let rng = StdRng::from_seed(seed);

    Ok(rng
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_generate_code_exact_length() {
        for length in [1, 2, 6, 12, 32] {
            let code = generate_code(length).unwrap();
            assert_eq!(code.len(), length);
        }
    }

    #[test]
    fn test_generate_code_alphabet_membership() {
        let code = generate_code(256).unwrap();
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code(12).unwrap());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_roughly_uniform() {
        // 100k samples, expected ~1612 per character. Bounds are wide enough
        // that a correct sampler fails with negligible probability.
        let mut counts: HashMap<char, usize> = HashMap::new();

        for _ in 0..2000 {
            for c in generate_code(50).unwrap().chars() {
                *counts.entry(c).or_default() += 1;
            }
        }

        assert_eq!(counts.len(), ALPHABET_SIZE, "every character should appear");

        let expected = 100_000 / ALPHABET_SIZE;
        for (c, count) in counts {
            assert!(
                count > expected / 2 && count < expected * 2,
                "character '{}' over/under-represented: {} (expected ~{})",
                c,
                count,
                expected
            );
        }
    }
}
