//! Data types for the feature lattice.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::feature_set::{FeatureIndex, FeatureSet};

/// Default ceiling on `total_features - |given|`; `2^24` nodes is already ~16M.
pub const DEFAULT_MAX_DIMENSION: usize = 24;

/// One weighted transition `source -> source ∪ {feature}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub source: FeatureSet,
    pub target: FeatureSet,
    pub feature: FeatureIndex,
    pub weight: f64,
}

/// Hypercube sub-lattice of feature subsets above `given`.
///
/// Node indices follow enumeration order (complement subsets by size, then
/// lexicographically), so index 0 is `given` and the last index is the full
/// feature set. Edges are stored grouped by source in the same order.
#[derive(Clone, Debug)]
pub struct FeatureLattice {
    pub graph: DiGraph<FeatureSet, f64>,
    pub index: HashMap<FeatureSet, NodeIndex>,
    pub given: FeatureSet,
    pub total_features: usize,
}

impl FeatureLattice {
    /// Number of features that can still be acquired.
    pub fn dimension(&self) -> usize {
        self.total_features - self.given.len()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in enumeration order.
    pub fn nodes(&self) -> impl Iterator<Item = &FeatureSet> + '_ {
        self.graph.node_indices().map(move |i| &self.graph[i])
    }

    /// Edges in enumeration order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(move |e| {
            let source = self.graph[e.source()].clone();
            let target = self.graph[e.target()].clone();
            let feature = target.difference(&source).first().copied().unwrap_or_default();
            Edge {
                source,
                target,
                feature,
                weight: *e.weight(),
            }
        })
    }

    pub fn node_index(&self, node: &FeatureSet) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    pub fn node(&self, index: NodeIndex) -> &FeatureSet {
        &self.graph[index]
    }

    /// The `given` node.
    pub fn source(&self) -> NodeIndex {
        NodeIndex::new(0)
    }

    /// The node holding every feature.
    pub fn target(&self) -> NodeIndex {
        NodeIndex::new(self.graph.node_count().saturating_sub(1))
    }
}

/// Lattice construction configuration.
#[derive(Clone, Copy, Debug)]
pub struct LatticeCfg {
    /// Largest accepted `total_features - |given|`.
    pub max_dimension: usize,
    /// Evaluate edge weights on the rayon pool.
    pub parallel: bool,
}

impl Default for LatticeCfg {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            parallel: false,
        }
    }
}
