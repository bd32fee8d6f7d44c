//! The sensor network: node placement, clustering and energy decay.
//!
//! A [`Network`] owns its nodes, its energy model and its random source.
//! The caller drives it:
//!
//! ```text
//! Network::new(n, size)        place n nodes uniformly in [0, size)²
//!     │
//!     ▼
//! form_clusters(k)             pick k heads, attach every node to nearest
//!     │
//!     ▼
//! energy_efficient_routing()   one step of role-based drain (repeat)
//! ```
//!
//! # Tie-break rule
//!
//! Heads always belong to their own cluster, even when two heads share a
//! position. A member is assigned by scanning heads in ascending id order
//! and moving only to a *strictly* closer head, so among equidistant heads
//! the lowest id wins.

use crate::energy::EnergyModel;
use crate::error::{Result, WsnError};
use crate::node::{NodeSnapshot, SensorNode};
use nalgebra::Point2;
use tracing::debug;
use wsn_env::{is_valid_sample, NodeId, RandomSource, SystemSource};

/// A wireless sensor network deployed in a square area.
///
/// Not internally synchronized: every operation touches the whole node
/// collection, so concurrent callers need one exclusive lock around it.
#[derive(Debug, Clone)]
pub struct Network<R: RandomSource = SystemSource> {
    /// Nodes in id order (`nodes[i].id() == NodeId(i)`)
    nodes: Vec<SensorNode>,

    /// Side length of the deployment square
    size: f64,

    /// Per-step energy costs
    energy: EnergyModel,

    /// Entropy for placement and head selection
    rng: R,
}

fn check_size(size: f64) -> Result<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(WsnError::invalid("network_size", size, "a finite value > 0"));
    }
    Ok(())
}

impl Network<SystemSource> {
    /// Places `num_nodes` nodes uniformly at random using OS entropy.
    pub fn new(num_nodes: usize, network_size: f64) -> Result<Self> {
        Self::with_source(num_nodes, network_size, SystemSource::new())
    }
}

impl<R: RandomSource> Network<R> {
    /// Places `num_nodes` nodes uniformly at random using the given source.
    ///
    /// Coordinates are drawn from `[0, network_size)`, x then y, node by
    /// node in id order.
    pub fn with_source(num_nodes: usize, network_size: f64, rng: R) -> Result<Self> {
        Self::with_model(num_nodes, network_size, EnergyModel::default(), rng)
    }

    /// Like [`Network::with_source`], with a custom energy model.
    pub fn with_model(
        num_nodes: usize,
        network_size: f64,
        energy: EnergyModel,
        mut rng: R,
    ) -> Result<Self> {
        check_size(network_size)?;
        energy.validate()?;

        let nodes: Vec<SensorNode> = (0..num_nodes)
            .map(|i| {
                let x = rng.uniform(0.0, network_size);
                let y = rng.uniform(0.0, network_size);
                SensorNode::with_energy(NodeId(i), x, y, energy.initial_energy)
            })
            .collect();

        debug!(
            "Placed {} nodes in {}x{} area (seed={})",
            num_nodes,
            network_size,
            network_size,
            rng.seed()
        );

        Ok(Self {
            nodes,
            size: network_size,
            energy,
            rng,
        })
    }

    /// Builds a network from explicit positions; ids follow slice order.
    ///
    /// Every coordinate must be finite and within `[0, network_size]`.
    pub fn from_positions(positions: &[(f64, f64)], network_size: f64, rng: R) -> Result<Self> {
        check_size(network_size)?;

        let energy = EnergyModel::default();
        let mut nodes = Vec::with_capacity(positions.len());
        for (i, &(x, y)) in positions.iter().enumerate() {
            for (name, value) in [("x", x), ("y", y)] {
                if !value.is_finite() || !(0.0..=network_size).contains(&value) {
                    return Err(WsnError::invalid(
                        name,
                        format!("{} (node {})", value, i),
                        format!("a value in [0, {}]", network_size),
                    ));
                }
            }
            nodes.push(SensorNode::with_energy(NodeId(i), x, y, energy.initial_energy));
        }

        Ok(Self {
            nodes,
            size: network_size,
            energy,
            rng,
        })
    }

    /// Selects `num_clusters` random heads and attaches every node to its
    /// nearest head.
    ///
    /// Any previous clustering is discarded. Fails with `InvalidArgument`,
    /// leaving the network untouched, unless `0 < num_clusters <= len()`
    /// and the source answers with `num_clusters` distinct in-range picks.
    pub fn form_clusters(&mut self, num_clusters: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(WsnError::invalid(
                "num_clusters",
                num_clusters,
                "a network with at least one node",
            ));
        }
        if num_clusters == 0 || num_clusters > self.nodes.len() {
            return Err(WsnError::invalid(
                "num_clusters",
                num_clusters,
                format!("a value in 1..={}", self.nodes.len()),
            ));
        }

        let picks = self.rng.sample_indices(self.nodes.len(), num_clusters);
        if !is_valid_sample(&picks, self.nodes.len(), num_clusters) {
            return Err(WsnError::invalid(
                "random_source",
                format!("{:?}", picks),
                format!(
                    "{} distinct indices below {}",
                    num_clusters,
                    self.nodes.len()
                ),
            ));
        }
        let heads: Vec<NodeId> = picks.into_iter().map(NodeId).collect();
        self.assign_clusters(heads);
        Ok(())
    }

    /// Clusters around an explicit set of heads.
    ///
    /// Same assignment rule as [`Network::form_clusters`]. Rejects an empty
    /// list, duplicates and unknown ids before touching any node.
    pub fn form_clusters_with_heads(&mut self, head_ids: &[NodeId]) -> Result<()> {
        if head_ids.is_empty() {
            return Err(WsnError::invalid("head_ids", "[]", "at least one head"));
        }

        let mut heads = head_ids.to_vec();
        heads.sort_unstable();
        for pair in heads.windows(2) {
            if pair[0] == pair[1] {
                return Err(WsnError::invalid("head_ids", pair[0], "distinct node ids"));
            }
        }
        if let Some(&last) = heads.last() {
            if last.index() >= self.nodes.len() {
                return Err(WsnError::invalid(
                    "head_ids",
                    last,
                    format!("ids in 0..{}", self.nodes.len()),
                ));
            }
        }

        self.assign_clusters(heads);
        Ok(())
    }

    /// Rewrites every node's role against a validated head set.
    fn assign_clusters(&mut self, mut heads: Vec<NodeId>) {
        heads.sort_unstable();

        let head_positions: Vec<(NodeId, Point2<f64>)> = heads
            .iter()
            .map(|&id| (id, self.nodes[id.index()].position()))
            .collect();

        let mut is_head = vec![false; self.nodes.len()];
        for &id in &heads {
            is_head[id.index()] = true;
        }

        for node in &mut self.nodes {
            let id = node.id();
            if is_head[id.index()] {
                node.assign(true, id);
                continue;
            }

            let position = node.position();
            let mut best = head_positions[0].0;
            let mut best_distance = f64::INFINITY;
            for &(head_id, head_position) in &head_positions {
                let d = nalgebra::distance(&position, &head_position);
                if d < best_distance {
                    best = head_id;
                    best_distance = d;
                }
            }
            node.assign(false, best);
        }

        debug!(
            "Formed {} clusters over {} nodes: heads={:?}",
            heads.len(),
            self.nodes.len(),
            heads.iter().map(|h| h.index()).collect::<Vec<_>>()
        );
    }

    /// Advances the simulation one step: drains every node by its role's
    /// cost, floored at zero.
    ///
    /// Nodes that were never clustered pay the member cost. Depleted nodes
    /// stay in the network; topology never changes here.
    pub fn energy_efficient_routing(&mut self) {
        for node in &mut self.nodes {
            if node.is_depleted() {
                continue;
            }
            let next = self.energy.drain(node.energy(), node.is_cluster_head());
            node.set_energy(next);
            if node.is_depleted() {
                debug!("Node {} depleted (head={})", node.id(), node.is_cluster_head());
            }
        }
    }

    pub fn nodes(&self) -> &[SensorNode] {
        &self.nodes
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&SensorNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Side length of the deployment square.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn energy_model(&self) -> &EnergyModel {
        &self.energy
    }

    /// Returns the random source (e.g. to read back its seed).
    pub fn source(&self) -> &R {
        &self.rng
    }

    /// True once a clustering pass has run.
    pub fn is_clustered(&self) -> bool {
        // Every pass assigns every node, so the first node stands for all
        self.nodes.first().map_or(false, |n| n.cluster().is_some())
    }

    /// Current heads, in id order.
    pub fn cluster_heads(&self) -> impl Iterator<Item = &SensorNode> {
        self.nodes.iter().filter(|n| n.is_cluster_head())
    }

    /// Non-head nodes attached to `head`, in id order.
    pub fn members_of(&self, head: NodeId) -> impl Iterator<Item = &SensorNode> {
        self.nodes
            .iter()
            .filter(move |n| !n.is_cluster_head() && n.cluster() == Some(head))
    }

    /// Sum of all nodes' remaining energy.
    pub fn total_energy(&self) -> f64 {
        self.nodes.iter().map(SensorNode::energy).sum()
    }

    /// Number of nodes at the zero floor.
    pub fn depleted_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_depleted()).count()
    }

    /// Plain copies of every node, in id order.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.nodes.iter().map(SensorNode::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use wsn_env::{ScriptedSource, SeededSource};

    fn four_node_network() -> Network<SeededSource> {
        Network::from_positions(
            &[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)],
            20.0,
            SeededSource::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_construct_assigns_sequential_ids() {
        let net = Network::with_source(5, 50.0, SeededSource::new(42)).unwrap();

        assert_eq!(net.len(), 5);
        for (i, node) in net.nodes().iter().enumerate() {
            assert_eq!(node.id(), NodeId(i));
            assert_eq!(node.energy(), 100.0);
            assert_eq!(node.cluster(), None);
        }
        assert!(!net.is_clustered());
    }

    #[test]
    fn test_construct_rejects_bad_size() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Network::with_source(3, size, SeededSource::new(0)).unwrap_err();
            assert_eq!(err.parameter(), "network_size");
        }
    }

    #[test]
    fn test_default_source_places_in_bounds() {
        let net = Network::new(30, 10.0).unwrap();
        assert!(net
            .nodes()
            .iter()
            .all(|n| (0.0..10.0).contains(&n.x()) && (0.0..10.0).contains(&n.y())));
    }

    #[test]
    fn test_same_seed_same_network() {
        let mut a = Network::with_source(20, 100.0, SeededSource::new(7)).unwrap();
        let mut b = Network::with_source(20, 100.0, SeededSource::new(7)).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());

        a.form_clusters(4).unwrap();
        b.form_clusters(4).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_scenario_forced_heads() {
        let mut net = four_node_network();
        net.form_clusters_with_heads(&[NodeId(0), NodeId(2)]).unwrap();
        assert!(net.is_clustered());
        assert!(net.nodes().iter().all(|n| n.cluster().is_some()));

        let clusters: Vec<_> = net.nodes().iter().map(|n| n.cluster()).collect();
        assert_eq!(
            clusters,
            vec![Some(NodeId(0)), Some(NodeId(0)), Some(NodeId(2)), Some(NodeId(2))]
        );

        net.energy_efficient_routing();

        assert_relative_eq!(net.node(NodeId(0)).unwrap().energy(), 99.8);
        assert_relative_eq!(net.node(NodeId(1)).unwrap().energy(), 99.5);
        assert_relative_eq!(net.node(NodeId(2)).unwrap().energy(), 99.8);
        assert_relative_eq!(net.node(NodeId(3)).unwrap().energy(), 99.5);
    }

    #[test]
    fn test_scenario_scripted_source() {
        // Same scenario driven entirely through the random source
        let rng = ScriptedSource::new(0)
            .with_fractions([0.0, 0.0, 0.0, 0.05, 0.5, 0.5, 0.5, 0.55])
            .with_pick([2, 0]);
        let mut net = Network::with_source(4, 20.0, rng).unwrap();

        assert_relative_eq!(net.node(NodeId(1)).unwrap().y(), 1.0);
        assert_relative_eq!(net.node(NodeId(3)).unwrap().y(), 11.0);

        net.form_clusters(2).unwrap();

        let heads: Vec<_> = net.cluster_heads().map(|n| n.id()).collect();
        assert_eq!(heads, vec![NodeId(0), NodeId(2)]);
        assert_eq!(net.node(NodeId(1)).unwrap().cluster(), Some(NodeId(0)));
        assert_eq!(net.node(NodeId(3)).unwrap().cluster(), Some(NodeId(2)));

        let members: Vec<_> = net.members_of(NodeId(2)).map(|n| n.id()).collect();
        assert_eq!(members, vec![NodeId(3)]);
    }

    #[test]
    fn test_empty_network_rejects_clustering() {
        let mut net = Network::with_source(0, 10.0, SeededSource::new(0)).unwrap();
        assert!(net.is_empty());

        let err = net.form_clusters(1).unwrap_err();
        assert!(matches!(err, WsnError::InvalidArgument { name: "num_clusters", .. }));
    }

    #[test]
    fn test_empty_network_error_names_requirement() {
        let mut net = Network::with_source(0, 10.0, SeededSource::new(0)).unwrap();

        let msg = net.form_clusters(3).unwrap_err().to_string();
        assert!(msg.contains("at least one node"));
        assert!(!msg.contains("1..=0"));
    }

    /// Source whose `sample_indices` breaks its contract in a chosen way.
    struct BrokenPicks {
        answer: fn(usize, usize) -> Vec<usize>,
    }

    impl RandomSource for BrokenPicks {
        fn uniform(&mut self, low: f64, _high: f64) -> f64 {
            low
        }

        fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
            (self.answer)(len, amount)
        }

        fn seed(&self) -> u64 {
            0
        }
    }

    #[test]
    fn test_bad_source_picks_are_rejected() {
        let answers: [fn(usize, usize) -> Vec<usize>; 3] = [
            |_, amount| vec![0; amount],
            |len, amount| (len..len + amount).collect(),
            |_, amount| (0..amount - 1).collect(),
        ];

        for answer in answers {
            let mut net = Network::with_source(5, 10.0, BrokenPicks { answer }).unwrap();
            let before = net.snapshot();

            let err = net.form_clusters(3).unwrap_err();
            assert_eq!(err.parameter(), "random_source");
            assert_eq!(net.snapshot(), before);
            assert_eq!(net.cluster_heads().count(), 0);
        }
    }

    #[test]
    fn test_bad_cluster_count_leaves_state_untouched() {
        let mut net = four_node_network();
        net.form_clusters_with_heads(&[NodeId(1)]).unwrap();
        let before = net.snapshot();

        assert!(net.form_clusters(0).is_err());
        assert!(net.form_clusters(5).is_err());
        assert_eq!(net.snapshot(), before);
    }

    #[test]
    fn test_explicit_heads_validation() {
        let mut net = four_node_network();
        let before = net.snapshot();

        assert!(net.form_clusters_with_heads(&[]).is_err());
        assert!(net.form_clusters_with_heads(&[NodeId(1), NodeId(1)]).is_err());
        assert!(net.form_clusters_with_heads(&[NodeId(0), NodeId(4)]).is_err());
        assert_eq!(net.snapshot(), before);
    }

    #[test]
    fn test_from_positions_rejects_out_of_area() {
        let err = Network::from_positions(&[(1.0, 1.0), (25.0, 3.0)], 20.0, SeededSource::new(0))
            .unwrap_err();
        assert_eq!(err.parameter(), "x");

        let err = Network::from_positions(&[(1.0, f64::NAN)], 20.0, SeededSource::new(0))
            .unwrap_err();
        assert_eq!(err.parameter(), "y");
    }

    #[test]
    fn test_tie_breaks_to_lowest_head_id() {
        // Node 1 sits exactly halfway between heads 0 and 2
        let mut net = Network::from_positions(
            &[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)],
            10.0,
            SeededSource::new(0),
        )
        .unwrap();

        net.form_clusters_with_heads(&[NodeId(2), NodeId(0)]).unwrap();
        assert_eq!(net.node(NodeId(1)).unwrap().cluster(), Some(NodeId(0)));
    }

    #[test]
    fn test_coincident_heads_keep_own_cluster() {
        let mut net = Network::from_positions(
            &[(3.0, 3.0), (3.0, 3.0), (4.0, 3.0)],
            10.0,
            SeededSource::new(0),
        )
        .unwrap();

        net.form_clusters_with_heads(&[NodeId(0), NodeId(1)]).unwrap();

        assert_eq!(net.cluster_heads().count(), 2);
        assert_eq!(net.node(NodeId(1)).unwrap().cluster(), Some(NodeId(1)));
        assert_eq!(net.node(NodeId(2)).unwrap().cluster(), Some(NodeId(0)));
    }

    #[test]
    fn test_reclustering_discards_previous_heads() {
        let mut net = four_node_network();
        net.form_clusters_with_heads(&[NodeId(0), NodeId(2)]).unwrap();
        net.form_clusters_with_heads(&[NodeId(3)]).unwrap();

        let heads: Vec<_> = net.cluster_heads().map(|n| n.id()).collect();
        assert_eq!(heads, vec![NodeId(3)]);
        assert!(net.nodes().iter().all(|n| n.cluster() == Some(NodeId(3))));
    }

    #[test]
    fn test_unclustered_nodes_pay_member_cost() {
        let mut net = four_node_network();
        net.energy_efficient_routing();
        assert!(net.nodes().iter().all(|n| n.energy() == 99.5));
    }

    #[test]
    fn test_energy_floor_and_depletion() {
        let mut net = four_node_network();
        net.form_clusters_with_heads(&[NodeId(0)]).unwrap();

        // Members empty after 200 steps, the head after 500
        for _ in 0..200 {
            net.energy_efficient_routing();
        }
        assert_eq!(net.depleted_count(), 3);
        assert!(!net.node(NodeId(0)).unwrap().is_depleted());

        for _ in 0..400 {
            net.energy_efficient_routing();
        }
        assert_eq!(net.depleted_count(), 4);
        assert_eq!(net.total_energy(), 0.0);
        assert!(net.nodes().iter().all(|n| n.energy() == 0.0));
    }

    #[test]
    fn test_custom_energy_model() {
        let model = EnergyModel {
            initial_energy: 1.0,
            head_cost: 0.25,
            member_cost: 1.0,
        };
        let mut net = Network::with_model(3, 10.0, model, SeededSource::new(5)).unwrap();
        net.form_clusters(1).unwrap();
        net.energy_efficient_routing();

        let head = net.cluster_heads().next().unwrap();
        assert_relative_eq!(head.energy(), 0.75);
        assert_eq!(net.depleted_count(), 2);
        assert_eq!(net.energy_model(), &model);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_distance_symmetric(
                ax in -1e3f64..1e3, ay in -1e3f64..1e3,
                bx in -1e3f64..1e3, by in -1e3f64..1e3,
            ) {
                let a = SensorNode::new(NodeId(0), ax, ay);
                let b = SensorNode::new(NodeId(1), bx, by);
                prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
                prop_assert_eq!(a.distance_to(&a), 0.0);
            }

            #[test]
            fn prop_placement_in_bounds(seed in any::<u64>(), n in 0usize..60, size in 0.5f64..500.0) {
                let net = Network::with_source(n, size, SeededSource::new(seed)).unwrap();
                prop_assert_eq!(net.len(), n);
                for node in net.nodes() {
                    prop_assert!(node.x() >= 0.0 && node.x() < size);
                    prop_assert!(node.y() >= 0.0 && node.y() < size);
                }
            }

            #[test]
            fn prop_clustering_invariants(seed in any::<u64>(), n in 1usize..40, k_frac in 0.0f64..1.0) {
                let k = 1 + ((n - 1) as f64 * k_frac) as usize;
                let mut net = Network::with_source(n, 100.0, SeededSource::new(seed)).unwrap();

                // Twice: each pass must satisfy the invariants on its own
                for _ in 0..2 {
                    net.form_clusters(k).unwrap();

                    let heads: Vec<&SensorNode> = net.cluster_heads().collect();
                    prop_assert_eq!(heads.len(), k);

                    for node in net.nodes() {
                        let assigned = node.cluster().unwrap();
                        let head = net.node(assigned).unwrap();
                        prop_assert!(head.is_cluster_head());
                        let d = node.distance_to(head);
                        for other in &heads {
                            prop_assert!(node.distance_to(other) >= d);
                        }
                    }
                }
            }

            #[test]
            fn prop_energy_floor(seed in any::<u64>(), steps in 0usize..400) {
                let mut net = Network::with_source(8, 50.0, SeededSource::new(seed)).unwrap();
                net.form_clusters(2).unwrap();
                let before = net.snapshot();

                for _ in 0..steps {
                    net.energy_efficient_routing();
                }

                for (prev, node) in before.iter().zip(net.nodes()) {
                    prop_assert!(node.energy() >= 0.0);
                    prop_assert!(node.energy() <= prev.energy);
                }
            }

            #[test]
            fn prop_differentiated_decay(start in 0.0f64..200.0) {
                let model = EnergyModel { initial_energy: start, ..Default::default() };
                let mut net = Network::with_model(2, 10.0, model, SeededSource::new(1)).unwrap();
                net.form_clusters_with_heads(&[NodeId(0)]).unwrap();
                net.energy_efficient_routing();

                prop_assert_eq!(net.node(NodeId(0)).unwrap().energy(), (start - 0.2).max(0.0));
                prop_assert_eq!(net.node(NodeId(1)).unwrap().energy(), (start - 0.5).max(0.0));
            }
        }
    }
}
