//! WSN Simulation Harness
//!
//! This crate drives the `wsn_core` network model the way an interactive
//! front end would: deploy nodes, form clusters once, then step the energy
//! model, with every draw coming from a single 64-bit seed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  SimWorld                    │
//! │  ┌────────────────────────────────────────┐  │
//! │  │ Network<SeededSource>                  │  │
//! │  │   nodes ─ form_clusters ─ routing step │  │
//! │  └────────────────────────────────────────┘  │
//! │        │                       │             │
//! │   RunReport               NetworkView        │
//! │  (node details)        (plot-ready JSON)     │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use wsn_sim::{SimConfig, SimWorld};
//!
//! let config = SimConfig {
//!     seed: 7,
//!     num_nodes: 20,
//!     ..Default::default()
//! };
//!
//! let mut world = SimWorld::new(config)?;
//! world.form_clusters()?;
//! world.run(|_, _| {});
//! assert_eq!(world.report().steps_run, 5);
//! # Ok::<(), wsn_sim::SimError>(())
//! ```

mod error;
mod exporter;
mod world;

pub use error::SimError;
pub use exporter::{ClusterLink, NetworkView};
pub use world::{RunReport, SimConfig, SimWorld};
