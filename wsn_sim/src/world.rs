//! SimWorld - the caller-owned simulation container.

use crate::error::SimError;
use crate::exporter::NetworkView;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wsn_core::{EnergyModel, Network, NodeSnapshot};
use wsn_env::SeededSource;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Master seed for determinism
    pub seed: u64,

    /// Number of sensor nodes to place
    pub num_nodes: usize,

    /// Side length of the square deployment area
    pub network_size: f64,

    /// Number of cluster heads to elect
    pub num_clusters: usize,

    /// Routing steps per run
    pub steps: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_nodes: 10,
            network_size: 100.0,
            num_clusters: 3,
            steps: 5,
        }
    }
}

/// Summary of a run, as printed or serialized by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Configuration the run used
    pub config: SimConfig,

    /// Energy costs the run used
    pub energy_model: EnergyModel,

    /// Routing steps actually executed
    pub steps_run: u64,

    /// Sum of remaining energy
    pub total_energy: f64,

    /// Nodes at the zero floor
    pub depleted: usize,

    /// Final per-node state in id order
    pub nodes: Vec<NodeSnapshot>,
}

impl RunReport {
    /// One human-readable line per node.
    pub fn node_details(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|n| {
                let cluster = n
                    .cluster
                    .map_or_else(|| "none".to_string(), |c| c.to_string());
                format!(
                    "Node {}: Energy = {:.2} mAh, Cluster Head = {}, Cluster = {}",
                    n.id, n.energy, n.is_cluster_head, cluster
                )
            })
            .collect()
    }
}

/// The SimWorld - owns one network and the step counter driving it.
///
/// There is no process-wide state: the caller decides how long a world
/// lives and how often it is stepped.
pub struct SimWorld {
    /// Configuration
    config: SimConfig,

    /// The simulated network (seeded from `config.seed`)
    network: Network<SeededSource>,

    /// Routing steps executed so far
    tick_count: u64,
}

impl SimWorld {
    /// Places the nodes for the given configuration.
    ///
    /// Placement draws come first from the seeded stream, so the cluster
    /// count never changes where nodes land.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let network = Network::with_source(
            config.num_nodes,
            config.network_size,
            SeededSource::new(config.seed),
        )?;

        info!(
            "Deployed {} nodes in {}x{} area (seed={})",
            config.num_nodes, config.network_size, config.network_size, config.seed
        );

        Ok(Self {
            config,
            network,
            tick_count: 0,
        })
    }

    /// Runs one clustering pass with `config.num_clusters` heads.
    pub fn form_clusters(&mut self) -> Result<(), SimError> {
        self.network.form_clusters(self.config.num_clusters)?;

        let heads: Vec<String> = self
            .network
            .cluster_heads()
            .map(|h| h.id().to_string())
            .collect();
        info!("Formed {} clusters: heads [{}]", heads.len(), heads.join(", "));
        Ok(())
    }

    /// Advances the simulation by one routing step.
    pub fn tick(&mut self) {
        self.network.energy_efficient_routing();
        self.tick_count += 1;

        debug!(
            "  step={} | total_energy={:.2} | depleted={}",
            self.tick_count,
            self.network.total_energy(),
            self.network.depleted_count()
        );
    }

    /// Runs `config.steps` routing steps, calling `on_step` after each.
    pub fn run(&mut self, mut on_step: impl FnMut(u64, &Network<SeededSource>)) {
        for _ in 0..self.config.steps {
            self.tick();
            on_step(self.tick_count, &self.network);
        }
    }

    /// Summarizes the current state.
    pub fn report(&self) -> RunReport {
        RunReport {
            config: self.config.clone(),
            energy_model: *self.network.energy_model(),
            steps_run: self.tick_count,
            total_energy: self.network.total_energy(),
            depleted: self.network.depleted_count(),
            nodes: self.network.snapshot(),
        }
    }

    /// Captures a render-ready view of the current state.
    pub fn view(&self) -> NetworkView {
        NetworkView::capture(&self.network, self.tick_count)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn network(&self) -> &Network<SeededSource> {
        &self.network
    }

    /// Returns the number of routing steps executed.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
