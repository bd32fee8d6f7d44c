//! Deterministic RandomSource for simulation runs.

use crate::source::{sample_with, uniform_with};
use crate::RandomSource;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded source backed by a ChaCha8 stream.
///
/// Same seed always produces the same draws for the same call sequence.
#[derive(Debug, Clone)]
pub struct SeededSource {
    /// Master seed for this stream
    seed: u64,

    /// Deterministic generator
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a new source with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        uniform_with(&mut self.rng, low, high)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        sample_with(&mut self.rng, len, amount)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
