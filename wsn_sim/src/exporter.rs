//! JSON exporter for plotting the network.
//!
//! Captures the current state only (positions, roles, head links) so an
//! external plotter can draw heads, members and the member-to-head lines.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use wsn_core::{Network, NodeId, NodeSnapshot};
use wsn_env::RandomSource;

/// A member-to-head line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterLink {
    pub member: NodeId,
    pub head: NodeId,
    pub from: [f64; 2],
    pub to: [f64; 2],
}

/// Render-ready view of a network at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkView {
    /// Side length of the deployment square (plot bounds)
    pub network_size: f64,

    /// Routing steps executed when captured
    pub step: u64,

    /// Every node, in id order
    pub nodes: Vec<NodeSnapshot>,

    /// Current cluster heads, in id order
    pub heads: Vec<NodeId>,

    /// One link per clustered member
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub links: Vec<ClusterLink>,
}

impl NetworkView {
    /// Captures the network's current state.
    pub fn capture<R: RandomSource>(network: &Network<R>, step: u64) -> Self {
        let nodes = network.snapshot();

        let heads = nodes
            .iter()
            .filter(|n| n.is_cluster_head)
            .map(|n| n.id)
            .collect();

        let links = nodes
            .iter()
            .filter(|n| !n.is_cluster_head)
            .filter_map(|n| {
                let head = network.node(n.cluster?)?;
                Some(ClusterLink {
                    member: n.id,
                    head: head.id(),
                    from: [n.x, n.y],
                    to: [head.x(), head.y()],
                })
            })
            .collect();

        Self {
            network_size: network.size(),
            step,
            nodes,
            heads,
            links,
        }
    }

    /// Encodes the view as pretty JSON.
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
