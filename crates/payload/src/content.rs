//! Random alphanumeric content.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Generate a string of exactly `length` characters drawn from `[A-Za-z0-9]`.
///
/// Each call samples independently; nothing about uniqueness is promised.
pub fn generate_content<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_length_for_all_sizes() {
        let mut rng = StdRng::seed_from_u64(42);
        for length in [0, 1, 16, 255, 4096] {
            let content = generate_content(&mut rng, length);
            assert_eq!(content.len(), length);
        }
    }

    #[test]
    fn test_alphabet_is_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(7);
        let content = generate_content(&mut rng, 10_000);
        assert!(content.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_resampled_per_call() {
        let mut rng = StdRng::seed_from_u64(42);
        let first = generate_content(&mut rng, 32);
        let second = generate_content(&mut rng, 32);
        assert_ne!(first, second);
    }
}
