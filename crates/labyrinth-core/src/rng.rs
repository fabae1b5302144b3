//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a seeded `StdRng`. In tests, a scripted
//! implementation is injected so maze layouts and room variants are
//! repeatable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Pick an index in `0..len`, or `None` when `len` is zero.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        let last = u32::try_from(len.checked_sub(1)?).unwrap_or(u32::MAX);
        let picked = self.next_u32_range(0, last) as usize;
        Some(picked.min(len - 1))
    }
}

/// Picks one element of `items` uniformly.
pub fn choose<'a, T>(rng: &mut dyn DeterministicRng, items: &'a [T]) -> Option<&'a T> {
    rng.pick_index(items.len()).map(|index| &items[index])
}

/// Production RNG backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRng(StdRng);

impl SeededRng {
    /// Creates an RNG that replays the same sequence for the same seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }
}
