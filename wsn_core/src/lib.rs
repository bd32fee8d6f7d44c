//! WSN Core - Clustered Wireless Sensor Network Model
//!
//! A set of sensor nodes is scattered over a square area, organized into
//! clusters around randomly chosen heads, and drained of energy step by
//! step according to role:
//! 1. **Placement**: uniform positions in `[0, size)²`, ids `0..n`
//! 2. **Clustering**: `k` heads sampled without replacement; every node
//!    joins its nearest head
//! 3. **Routing step**: heads lose 0.2, members 0.5, floored at zero
//!
//! Randomness is injected through [`wsn_env::RandomSource`], so a seeded or
//! scripted source makes every run reproducible.
//!
//! ```
//! use wsn_core::Network;
//! use wsn_env::SeededSource;
//!
//! let mut net = Network::with_source(10, 100.0, SeededSource::new(42))?;
//! net.form_clusters(3)?;
//! net.energy_efficient_routing();
//! assert_eq!(net.cluster_heads().count(), 3);
//! # Ok::<(), wsn_core::WsnError>(())
//! ```

pub mod energy;
pub mod error;
pub mod network;
pub mod node;

// Re-export key types for convenience
pub use energy::EnergyModel;
pub use error::{Result, WsnError};
pub use network::Network;
pub use node::{NodeSnapshot, SensorNode};
pub use wsn_env::NodeId;
