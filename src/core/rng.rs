//! Deterministic random number generation for card draws.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical cards
//! - **Injectable**: Card generation takes `&mut GameRng`, so tests pin the seed
//! - **Serializable**: O(1) state capture and restore for session checkpoints
//!
//! ```
//! use bingo_sync::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let picks = rng.sample_distinct(1, 15, 5);
//! assert_eq!(picks.len(), 5);
//!
//! // Same seed, same picks
//! let mut again = GameRng::new(42);
//! assert_eq!(again.sample_distinct(1, 15, 5), picks);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used for card generation.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The drawn seed is kept, so the session can still be checkpointed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw `amount` distinct values from `low..=high` without replacement.
    ///
    /// The result is in draw order, not sorted. Returns fewer than `amount`
    /// values only if the range is too small; callers check that first.
    pub fn sample_distinct(&mut self, low: u32, high: u32, amount: usize) -> Vec<u32> {
        if high < low {
            return Vec::new();
        }
        let len = (high - low) as usize + 1;
        let amount = amount.min(len);
        rand::seq::index::sample(&mut self.inner, len, amount)
            .into_iter()
            .map(|offset| low + offset as u32)
            .collect()
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many cards have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the generator was created with.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.sample_distinct(1, 75, 5), rng2.sample_distinct(1, 75, 5));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1 = rng1.sample_distinct(1, 1000, 10);
        let seq2 = rng2.sample_distinct(1, 1000, 10);

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_sample_distinct_in_range() {
        let mut rng = GameRng::new(7);

        for _ in 0..50 {
            let mut picks = rng.sample_distinct(16, 30, 5);
            assert_eq!(picks.len(), 5);
            assert!(picks.iter().all(|n| (16..=30).contains(n)));

            picks.sort_unstable();
            picks.dedup();
            assert_eq!(picks.len(), 5, "picks must be distinct");
        }
    }

    #[test]
    fn test_sample_distinct_whole_range() {
        let mut rng = GameRng::new(7);
        let mut picks = rng.sample_distinct(1, 5, 5);
        picks.sort_unstable();
        assert_eq!(picks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sample_distinct_small_range() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.sample_distinct(1, 3, 5).len(), 3);
        assert!(rng.sample_distinct(10, 9, 5).is_empty());
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            rng.sample_distinct(1, 75, 5);
        }

        let state = rng.state();
        let expected = rng.sample_distinct(1, 75, 10);

        let mut restored = GameRng::from_state(&state);
        assert_eq!(restored.sample_distinct(1, 75, 10), expected);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_from_entropy_keeps_seed() {
        let rng = GameRng::from_entropy();
        assert_eq!(rng.state().seed, rng.seed());
    }
}
