//! Core randomness trait for the sensor network model.

/// The central interface for randomness.
///
/// This trait abstracts entropy so that the network model can run in both
/// production (OS-seeded) and simulation (seeded, replayable) environments.
///
/// # Implementations
///
/// - **Production**: `SystemSource` - wraps `rand::thread_rng`
/// - **Simulation**: `SeededSource` - wraps `ChaCha8Rng(seed)`
/// - **Tests**: `ScriptedSource` - serves queued draws first
///
/// # Determinism
///
/// Two sources of the same kind built from the same seed must yield the
/// same sequence of draws for the same sequence of calls.
pub trait RandomSource {
    /// Draws a real value uniformly from the half-open range `[low, high)`.
    ///
    /// Returns `low` when the range is empty (`low >= high`).
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Picks `amount` distinct indices from `0..len` uniformly, without
    /// replacement.
    ///
    /// The order of the returned indices is unspecified. Callers must
    /// ensure `amount <= len`.
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize>;

    /// Returns the source's seed (for logging/debugging).
    ///
    /// In production, returns 0 (not seeded).
    fn seed(&self) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (**self).sample_indices(len, amount)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (**self).sample_indices(len, amount)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}

/// Checks a `sample_indices` answer: exactly `amount` distinct indices,
/// each below `len`.
pub fn is_valid_sample(pick: &[usize], len: usize, amount: usize) -> bool {
    if pick.len() != amount || pick.iter().any(|&i| i >= len) {
        return false;
    }
    let mut sorted = pick.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).all(|w| w[0] != w[1])
}

/// Shared `uniform` body for any `rand::Rng`.
pub(crate) fn uniform_with<G: rand::Rng>(rng: &mut G, low: f64, high: f64) -> f64 {
    if !(low < high) {
        return low;
    }
    rng.gen_range(low..high)
}

/// Shared `sample_indices` body for any `rand::Rng`.
pub(crate) fn sample_with<G: rand::Rng>(rng: &mut G, len: usize, amount: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, len, amount.min(len)).into_vec()
}
