//! WSN Environment Abstraction Layer
//!
//! This crate isolates the one source of non-determinism in the sensor
//! network model: randomness. Node placement and cluster-head selection draw
//! from a [`RandomSource`], so the same model code runs against:
//! - **Production**: [`SystemSource`] - thread-local OS-seeded entropy
//! - **Simulation**: [`SeededSource`] - ChaCha8 stream from a 64-bit seed
//! - **Tests**: [`ScriptedSource`] - queued draws, then a seeded fallback
//!
//! By deriving all entropy from a single 64-bit seed, any run becomes
//! reproducible via its seed number.
//!
//! # Example
//!
//! ```
//! use wsn_env::{RandomSource, SeededSource};
//!
//! let mut rng = SeededSource::new(42);
//! let x = rng.uniform(0.0, 100.0);
//! assert!((0.0..100.0).contains(&x));
//!
//! let heads = rng.sample_indices(10, 3);
//! assert_eq!(heads.len(), 3);
//! ```

mod scripted;
mod seeded;
mod source;
mod system;
mod types;

pub use scripted::ScriptedSource;
pub use seeded::SeededSource;
pub use source::{is_valid_sample, RandomSource};
pub use system::SystemSource;
pub use types::NodeId;
