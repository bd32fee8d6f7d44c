//! Scripted RandomSource for forcing exact placements and head picks.

use crate::{is_valid_sample, RandomSource, SeededSource};
use std::collections::VecDeque;

/// Largest `f64` strictly below 1.0.
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

/// Source that replays queued draws before falling back to a seeded stream.
///
/// - `uniform(low, high)` pops the next queued *fraction* `u` and returns
///   `low + u * (high - low)`. Fractions are clamped into `[0, 1)` so the
///   result always lies in the requested half-open range.
/// - `sample_indices(len, amount)` pops the next queued pick list if it is
///   a valid answer (exactly `amount` distinct indices below `len`).
///   An invalid pick list is discarded and the fallback answers instead.
///
/// Once a queue is empty, draws come from a `SeededSource`.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    /// Queued uniform fractions
    fractions: VecDeque<f64>,

    /// Queued index picks
    picks: VecDeque<Vec<usize>>,

    /// Fallback stream once the queues run dry
    fallback: SeededSource,
}

impl ScriptedSource {
    /// Creates an empty script over the given fallback seed.
    pub fn new(fallback_seed: u64) -> Self {
        Self {
            fractions: VecDeque::new(),
            picks: VecDeque::new(),
            fallback: SeededSource::new(fallback_seed),
        }
    }

    /// Queues uniform fractions (each in `[0, 1)`).
    pub fn with_fractions(mut self, fractions: impl IntoIterator<Item = f64>) -> Self {
        self.fractions.extend(fractions);
        self
    }

    /// Queues one `sample_indices` answer.
    pub fn with_pick(mut self, pick: impl Into<Vec<usize>>) -> Self {
        self.picks.push_back(pick.into());
        self
    }

    /// Number of queued fractions not yet consumed.
    pub fn remaining_fractions(&self) -> usize {
        self.fractions.len()
    }

    /// Number of queued picks not yet consumed.
    pub fn remaining_picks(&self) -> usize {
        self.picks.len()
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if !(low < high) {
            return low;
        }
        match self.fractions.pop_front() {
            Some(u) => {
                let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, ONE_BELOW) };
                let value = low + u * (high - low);
                // Rounding can land exactly on `high` for wide ranges
                if value < high { value } else { low }
            }
            None => self.fallback.uniform(low, high),
        }
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        match self.picks.pop_front() {
            Some(pick) if is_valid_sample(&pick, len, amount) => pick,
            _ => self.fallback.sample_indices(len, amount),
        }
    }

    fn seed(&self) -> u64 {
        self.fallback.seed()
    }
}
