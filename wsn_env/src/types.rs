//! Common types for the WSN environment abstraction.

use serde::{Deserialize, Serialize};

/// Identifier of a sensor node within its network.
///
/// Ids are dense: a network of `n` nodes uses `0..n`, in creation order,
/// so an id doubles as the node's index in the network's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the id as a collection index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
