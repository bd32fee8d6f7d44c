//! Sensor nodes: position, energy and cluster-role state.

use crate::energy::INITIAL_ENERGY;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use wsn_env::NodeId;

/// A single sensor in the deployment area.
///
/// Position and id are fixed at creation. Role (`is_cluster_head`,
/// `cluster`) is written only by a clustering pass and `energy` only by a
/// routing step, both owned by [`crate::Network`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorNode {
    /// Unique id within the network
    id: NodeId,

    /// Position [x, y] in the deployment plane
    position: Point2<f64>,

    /// Remaining energy, never negative
    energy: f64,

    /// True if chosen as head in the last clustering pass
    is_cluster_head: bool,

    /// Head this node belongs to, once clustered
    cluster: Option<NodeId>,
}

impl SensorNode {
    /// Creates a node at `(x, y)` with full energy and no cluster.
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self::with_energy(id, x, y, INITIAL_ENERGY)
    }

    pub(crate) fn with_energy(id: NodeId, x: f64, y: f64, energy: f64) -> Self {
        Self {
            id,
            position: Point2::new(x, y),
            energy: energy.max(0.0),
            is_cluster_head: false,
            cluster: None,
        }
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &SensorNode) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn is_cluster_head(&self) -> bool {
        self.is_cluster_head
    }

    /// Id of this node's cluster head, `None` before the first clustering.
    pub fn cluster(&self) -> Option<NodeId> {
        self.cluster
    }

    /// True once energy has hit the zero floor.
    pub fn is_depleted(&self) -> bool {
        self.energy <= 0.0
    }

    pub(crate) fn assign(&mut self, is_cluster_head: bool, cluster: NodeId) {
        self.is_cluster_head = is_cluster_head;
        self.cluster = Some(cluster);
    }

    pub(crate) fn set_energy(&mut self, energy: f64) {
        // Energy is monotonically non-increasing and floored at zero
        self.energy = energy.clamp(0.0, self.energy);
    }

    /// Returns a plain copy of the node's state for rendering.
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            id: self.id,
            x: self.position.x,
            y: self.position.y,
            energy: self.energy,
            is_cluster_head: self.is_cluster_head,
            cluster: self.cluster,
        }
    }
}

/// Read-only view of one node, as handed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub energy: f64,
    pub is_cluster_head: bool,
    pub cluster: Option<NodeId>,
}
