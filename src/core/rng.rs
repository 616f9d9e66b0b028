//! Deterministic random number generation for deck shuffling and casual play.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deal
//! - **Forkable**: Derive independent per-game streams from one session seed
//! - **Context streams**: Separate sequences for shuffling and player choices
//!
//! ```
//! use calculation_solver::core::GameRng;
//!
//! let mut session = GameRng::new(42);
//!
//! // Each game gets its own stream
//! let game_one = session.fork();
//! let mut game_two = session.fork();
//! assert_ne!(game_one.seed(), game_two.seed());
//!
//! // Replaying the session reproduces the same forks
//! let mut again = GameRng::new(42);
//! assert_eq!(again.fork().seed(), game_one.seed());
//! # let _ = game_two.choose(&[1, 2, 3]);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
            fork_counter: 0,
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picks(rng: &mut GameRng, count: usize) -> Vec<u16> {
        let values: Vec<u16> = (0..1000).collect();
        (0..count).filter_map(|_| rng.choose(&values).copied()).collect()
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        assert_eq!(picks(&mut rng1, 100), picks(&mut rng2, 100));
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        assert_eq!(rng1.fork().seed(), rng2.fork().seed());
        assert_eq!(rng1.fork().seed(), rng2.fork().seed());
    }

    #[test]
    fn test_successive_forks_differ() {
        let mut rng = GameRng::new(7);
        let a = rng.fork();
        let b = rng.fork();

        assert_ne!(a.seed(), b.seed());
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut ctx1 = GameRng::new(42).for_context("deal");
        let mut ctx2 = GameRng::new(42).for_context("deal");

        assert_eq!(picks(&mut ctx1, 10), picks(&mut ctx2, 10));
    }

    #[test]
    fn test_context_streams_differ() {
        let rng = GameRng::new(42);
        let mut deal = rng.for_context("deal");
        let mut play = rng.for_context("play");

        assert_ne!(picks(&mut deal, 10), picks(&mut play, 10));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u8> = (0..20).collect();
        let before = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, before);
        data.sort_unstable();
        assert_eq!(data, before);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = [1, 2, 3];

        let chosen = rng.choose(&items).copied();
        assert!(matches!(chosen, Some(1..=3)));

        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
