//! Deterministic random number generation with forking for round isolation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Each round gets an independent branch of the session RNG
//! - **Context streams**: Independent sequences for different purposes
//!   (deck shuffling vs feedback selection)
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork for a new round
//! let mut round_rng = rng.fork();
//!
//! // Original and fork produce different sequences
//! let a: Vec<usize> = (0..8).map(|_| rng.gen_range_usize(0..1000)).collect();
//! let b: Vec<usize> = (0..8).map(|_| round_rng.gen_range_usize(0..1000)).collect();
//! assert_ne!(a, b);
//!
//! // But forks are deterministic - same fork counter = same sequence
//! let mut rng2 = GameRng::new(42);
//! let mut round_rng2 = rng2.fork();
//! // round_rng and round_rng2 would produce the same sequence
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG shared by symbol draws, deck shuffles, and feedback picks.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
/// Passed explicitly into everything that randomizes, so tests can supply a
/// fixed seed instead of ambient entropy.
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

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    /// Every round forks the session RNG so decks stay independent
    /// across restarts.
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
    /// Useful for separating randomness domains (e.g., deck shuffling vs
    /// feedback messages). The same context always produces the same stream
    /// from the same RNG state.
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

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (Fisher-Yates via `rand`).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Return a freshly shuffled copy, leaving the input untouched.
    ///
    /// Callers that hold the source sequence must not assume the copy
    /// aliases it.
    #[must_use]
    pub fn shuffled<T: Clone>(&mut self, slice: &[T]) -> Vec<T> {
        let mut out = slice.to_vec();
        self.shuffle(&mut out);
        out
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

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed, forked2.seed);
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut ctx1 = rng.for_context("deck");
        let mut ctx2 = rng.for_context("feedback");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_is_deterministic() {
        let rng1 = GameRng::new(42);
        let rng2 = GameRng::new(42);

        let mut ctx1 = rng1.for_context("test");
        let mut ctx2 = rng2.for_context("test");

        for _ in 0..10 {
            assert_eq!(ctx1.gen_range_usize(0..1000), ctx2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Should be same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_shuffled_leaves_input_untouched() {
        let mut rng = GameRng::new(42);
        let data = vec!['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

        let copy = rng.shuffled(&data);

        assert_eq!(data, vec!['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h']);
        assert_eq!(copy.len(), data.len());

        let mut sorted = copy.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, data);
    }

    #[test]
    fn test_shuffled_independent_across_calls() {
        let mut rng = GameRng::new(42);
        let data: Vec<u32> = (0..32).collect();

        let first = rng.shuffled(&data);
        let second = rng.shuffled(&data);

        assert_ne!(first, second);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }
}
