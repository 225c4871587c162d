//! Shortest acquisition paths over a [`FeatureLattice`].
//!
//! Purpose
//! - Find the minimum-weight path from the `given` node to the full feature
//!   set with one of petgraph's generic algorithms, selected by
//!   [`PathStrategy`]: Dijkstra (A* with a zero estimate, which returns the
//!   path), Bellman–Ford for signed weights, or A* with the feature-cost
//!   heuristic.
//!
//! Notes
//! - `features_costs_heuristic` sums acquisition costs while edge weights are
//!   scores. It is admissible only when every edge weight is at least the cost
//!   of the feature it adds; nothing here checks that.

use petgraph::algo::{astar, bellman_ford};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::config::{PathMethod, PathStrategy};
use crate::error::{AcquisitionError, Result};
use crate::feature_set::{FeatureIndex, FeatureSet};
use crate::lattice::FeatureLattice;

/// Ordered lattice nodes from source to target; each step adds one feature.
#[derive(Clone, Debug, PartialEq)]
pub struct AcquisitionPath {
    nodes: Vec<FeatureSet>,
    weight: f64,
}

impl AcquisitionPath {
    /// Wrap a node sequence, checking the one-feature-per-step invariant.
    pub fn new(nodes: Vec<FeatureSet>, weight: f64) -> Result<Self> {
        if let Some(step) = nodes.windows(2).position(|w| {
            w[1].len() != w[0].len() + 1 || !w[0].is_subset(&w[1])
        }) {
            return Err(AcquisitionError::invalid(format!(
                "path step {step} does not add exactly one feature"
            )));
        }
        Ok(Self { nodes, weight })
    }

    /// Path following an acquisition order on top of `given`.
    pub fn from_order(given: &FeatureSet, order: &[FeatureIndex]) -> Self {
        let mut nodes = Vec::with_capacity(order.len() + 1);
        let mut current = given.clone();
        nodes.push(current.clone());
        for &f in order {
            if current.contains(f) {
                continue;
            }
            current = current.with(f);
            nodes.push(current.clone());
        }
        Self { nodes, weight: 0.0 }
    }

    pub fn nodes(&self) -> &[FeatureSet] {
        &self.nodes
    }

    /// Total edge weight reported by the search (0 for paths built from an order).
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of steps (edges).
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The feature introduced by each step, in path order.
    pub fn added_features(&self) -> impl Iterator<Item = FeatureIndex> + '_ {
        self.nodes
            .windows(2)
            .filter_map(|w| w[1].difference(&w[0]).first().copied())
    }
}

/// Sum of costs of the features in `node2` that are absent from `node1`.
pub fn features_costs_heuristic(node1: &FeatureSet, node2: &FeatureSet, costs: &[f64]) -> f64 {
    node2
        .difference(node1)
        .into_iter()
        .filter_map(|f| costs.get(f))
        .sum()
}

/// Shortest path from `lattice.given` to the full feature set.
pub fn shortest_path(
    lattice: &FeatureLattice,
    strategy: PathStrategy,
    costs: &[f64],
) -> Result<AcquisitionPath> {
    let source = lattice.source();
    let target = lattice.target();
    let path = match strategy {
        PathStrategy::Plain | PathStrategy::Method(PathMethod::Dijkstra) => {
            dijkstra_path(lattice, source, target)?
        }
        PathStrategy::Method(PathMethod::BellmanFord) => {
            bellman_ford_path(lattice, source, target)?
        }
        PathStrategy::HeuristicGuided => astar_path(lattice, source, target, |a, b| {
            features_costs_heuristic(a, b, costs)
        })?,
    };
    tracing::debug!(
        ?strategy,
        steps = path.len(),
        weight = path.weight(),
        "shortest acquisition path"
    );
    Ok(path)
}

/// Dijkstra between two lattice nodes; rejects negative edge weights.
pub fn dijkstra_path(
    lattice: &FeatureLattice,
    source: NodeIndex,
    target: NodeIndex,
) -> Result<AcquisitionPath> {
    if let Some(weight) = lattice
        .graph
        .edge_references()
        .map(|e| *e.weight())
        .find(|w| *w < 0.0)
    {
        return Err(AcquisitionError::NegativeWeight { weight });
    }
    let (weight, indices) = astar(&lattice.graph, source, |n| n == target, |e| *e.weight(), |_| 0.0)
        .ok_or(AcquisitionError::TargetUnreachable)?;
    to_path(lattice, &indices, weight)
}

/// Bellman–Ford between two lattice nodes; accepts signed weights.
pub fn bellman_ford_path(
    lattice: &FeatureLattice,
    source: NodeIndex,
    target: NodeIndex,
) -> Result<AcquisitionPath> {
    let paths =
        bellman_ford(&lattice.graph, source).map_err(|_| AcquisitionError::NegativeCycle)?;
    let weight = paths.distances[target.index()];
    if !weight.is_finite() {
        return Err(AcquisitionError::TargetUnreachable);
    }
    let mut indices = vec![target];
    let mut current = target;
    while current != source {
        current = paths.predecessors[current.index()].ok_or(AcquisitionError::TargetUnreachable)?;
        indices.push(current);
        if indices.len() > lattice.node_count() {
            return Err(AcquisitionError::NegativeCycle);
        }
    }
    indices.reverse();
    to_path(lattice, &indices, weight)
}

/// A* between two lattice nodes with `heuristic(node, target)` as the estimate.
pub fn astar_path<H>(
    lattice: &FeatureLattice,
    source: NodeIndex,
    target: NodeIndex,
    mut heuristic: H,
) -> Result<AcquisitionPath>
where
    H: FnMut(&FeatureSet, &FeatureSet) -> f64,
{
    if lattice.graph.edge_references().any(|e| *e.weight() < 0.0) {
        tracing::warn!("A* over negative edge weights; the returned path may not be optimal");
    }
    let goal = &lattice.graph[target];
    let (weight, indices) = astar(
        &lattice.graph,
        source,
        |n| n == target,
        |e| *e.weight(),
        |n| heuristic(&lattice.graph[n], goal),
    )
    .ok_or(AcquisitionError::TargetUnreachable)?;
    to_path(lattice, &indices, weight)
}

fn to_path(
    lattice: &FeatureLattice,
    indices: &[NodeIndex],
    weight: f64,
) -> Result<AcquisitionPath> {
    let nodes = indices.iter().map(|&i| lattice.node(i).clone()).collect();
    AcquisitionPath::new(nodes, weight)
}
