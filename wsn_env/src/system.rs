//! Production implementation of RandomSource using OS-seeded entropy.

use crate::source::{sample_with, uniform_with};
use crate::RandomSource;

/// Production source backed by `rand::thread_rng`.
///
/// This is the "real" implementation used outside of tests. Each draw goes
/// through the thread-local generator, so the source itself holds no state
/// and is `Send`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSource;

impl SystemSource {
    /// Creates a new SystemSource.
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for SystemSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        uniform_with(&mut rand::thread_rng(), low, high)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        sample_with(&mut rand::thread_rng(), len, amount)
    }

    fn seed(&self) -> u64 {
        // Production is not seeded
        0
    }
}
