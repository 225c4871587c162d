//! Lattice construction (nodes by enumeration, edges by one-feature extension).

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;

use crate::error::{AcquisitionError, Result};
use crate::feature_set::{FeatureIndex, FeatureSet};

use super::types::{FeatureLattice, LatticeCfg};

/// Build the lattice of every `given ∪ s`, `s ⊆ complement(given)`.
///
/// `weight(source, f)` gives the edge weight for `source -> source ∪ {f}`;
/// callers route it through a `ScoreMemoizer`. With `cfg.parallel` the weights
/// are evaluated on the rayon pool, but edge order stays deterministic.
pub fn build_lattice<W>(
    total_features: usize,
    given: &FeatureSet,
    weight: W,
    cfg: LatticeCfg,
) -> Result<FeatureLattice>
where
    W: Fn(&FeatureSet, FeatureIndex) -> f64 + Sync,
{
    if given.len() > total_features {
        return Err(AcquisitionError::GivenExceedsTotal {
            given: given.len(),
            total: total_features,
        });
    }
    if let Some(feature) = given.iter().find(|&f| f >= total_features) {
        return Err(AcquisitionError::FeatureOutOfRange {
            feature,
            total: total_features,
        });
    }
    let complement: Vec<FeatureIndex> = (0..total_features)
        .filter(|&f| !given.contains(f))
        .collect();
    let dimension = complement.len();
    let limit = cfg.max_dimension.min(usize::BITS as usize - 2);
    if dimension > limit {
        return Err(AcquisitionError::CapacityExceeded { dimension, limit });
    }

    // Nodes: complement subsets by increasing size, lexicographic within a size.
    let mut graph: DiGraph<FeatureSet, f64> =
        DiGraph::with_capacity(1usize << dimension, dimension << dimension.saturating_sub(1));
    let mut index: HashMap<FeatureSet, NodeIndex> = HashMap::with_capacity(1usize << dimension);
    for size in 0..=dimension {
        for_each_combination(dimension, size, |positions| {
            let node: FeatureSet = given
                .iter()
                .chain(positions.iter().map(|&p| complement[p]))
                .collect();
            let idx = graph.add_node(node.clone());
            index.insert(node, idx);
        });
    }

    // Edges: per source in node order, extend by each missing feature ascending.
    let mut pending: Vec<(NodeIndex, NodeIndex, FeatureIndex)> =
        Vec::with_capacity(dimension << dimension.saturating_sub(1));
    for source in graph.node_indices() {
        let node = &graph[source];
        for &f in complement.iter().filter(|&&f| !node.contains(f)) {
            let target = index
                .get(&node.with(f))
                .copied()
                .ok_or(AcquisitionError::TargetUnreachable)?;
            pending.push((source, target, f));
        }
    }
    let weights: Vec<f64> = if cfg.parallel {
        pending
            .par_iter()
            .map(|&(source, _, f)| weight(&graph[source], f))
            .collect()
    } else {
        pending
            .iter()
            .map(|&(source, _, f)| weight(&graph[source], f))
            .collect()
    };
    for (&(source, target, _), w) in pending.iter().zip(weights) {
        graph.add_edge(source, target, w);
    }

    tracing::debug!(
        total_features,
        given = %given,
        dimension,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        parallel = cfg.parallel,
        "feature lattice built"
    );
    Ok(FeatureLattice {
        graph,
        index,
        given: given.clone(),
        total_features,
    })
}

/// Visit every `k`-combination of `0..n` in lexicographic order.
fn for_each_combination(n: usize, k: usize, mut visit: impl FnMut(&[usize])) {
    if k > n {
        return;
    }
    let mut positions: Vec<usize> = (0..k).collect();
    loop {
        visit(&positions);
        // Rightmost slot that can still advance.
        let Some(i) = (0..k).rev().find(|&i| positions[i] < n - k + i) else {
            return;
        };
        positions[i] += 1;
        for j in i + 1..k {
            positions[j] = positions[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod combination_tests {
    use super::for_each_combination;

    fn collect(n: usize, k: usize) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        for_each_combination(n, k, |c| out.push(c.to_vec()));
        out
    }

    #[test]
    fn lexicographic_order() {
        assert_eq!(
            collect(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn edge_sizes() {
        assert_eq!(collect(3, 0), vec![Vec::<usize>::new()]);
        assert_eq!(collect(3, 3), vec![vec![0, 1, 2]]);
        assert!(collect(2, 3).is_empty());
        assert_eq!(collect(0, 0).len(), 1);
    }
}
