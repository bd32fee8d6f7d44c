//! Per-step energy model.
//!
//! A deliberately simplified asymmetric cost: cluster heads pay less per
//! routing step than members. This is not a radio model; it only encodes
//! the relative cost of the two roles.

use crate::error::{Result, WsnError};
use serde::{Deserialize, Serialize};

/// Energy every node starts with.
pub const INITIAL_ENERGY: f64 = 100.0;

/// Cost per routing step for a cluster head.
pub const HEAD_STEP_COST: f64 = 0.2;

/// Cost per routing step for a member node.
pub const MEMBER_STEP_COST: f64 = 0.5;

/// Energy parameters of a network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyModel {
    /// Starting energy of every node
    pub initial_energy: f64,

    /// Drain per step while acting as cluster head
    pub head_cost: f64,

    /// Drain per step while acting as member
    pub member_cost: f64,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self {
            initial_energy: INITIAL_ENERGY,
            head_cost: HEAD_STEP_COST,
            member_cost: MEMBER_STEP_COST,
        }
    }
}

impl EnergyModel {
    /// Checks that every value is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("initial_energy", self.initial_energy),
            ("head_cost", self.head_cost),
            ("member_cost", self.member_cost),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(WsnError::invalid(name, value, "a finite value >= 0"));
            }
        }
        Ok(())
    }

    /// Returns the per-step cost for a node in the given role.
    pub fn step_cost(&self, is_cluster_head: bool) -> f64 {
        if is_cluster_head {
            self.head_cost
        } else {
            self.member_cost
        }
    }

    /// Applies one step of drain, floored at zero.
    pub fn drain(&self, energy: f64, is_cluster_head: bool) -> f64 {
        (energy - self.step_cost(is_cluster_head)).max(0.0)
    }
}
