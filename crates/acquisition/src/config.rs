//! Acquisition configuration and path-search strategy selection.

use serde::Deserialize;

use crate::lattice::{LatticeCfg, DEFAULT_MAX_DIMENSION};

/// Exact shortest-path algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMethod {
    /// Non-negative edge weights only.
    #[default]
    Dijkstra,
    /// Signed edge weights.
    BellmanFord,
}

/// How the lattice is searched, fixed at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStrategy {
    /// Plain shortest path (Dijkstra).
    #[default]
    Plain,
    /// Shortest path with an explicit algorithm family.
    Method(PathMethod),
    /// A* guided by the feature-cost heuristic.
    HeuristicGuided,
}

/// Acquisition configuration, loadable from JSON/TOML with per-field defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AcquisitionConfig {
    #[serde(default)]
    pub strategy: PathStrategy,

    /// Evaluate lattice edge weights on the rayon pool.
    #[serde(default)]
    pub parallel_scoring: bool,

    /// Largest `total_features - |given|` accepted before reporting a capacity error.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: usize,

    /// Seed for the RNG handed to local-search drivers.
    #[serde(default)]
    pub seed: u64,
}

fn default_max_dimension() -> usize {
    DEFAULT_MAX_DIMENSION
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            strategy: PathStrategy::default(),
            parallel_scoring: false,
            max_dimension: default_max_dimension(),
            seed: 0,
        }
    }
}

impl AcquisitionConfig {
    /// Log a warning for settings that are legal but likely to misbehave.
    pub fn validate(&self) {
        if self.max_dimension > DEFAULT_MAX_DIMENSION + 4 {
            tracing::warn!(
                max_dimension = self.max_dimension,
                "max_dimension above {} allows lattices of 2^{} nodes; expect memory exhaustion",
                DEFAULT_MAX_DIMENSION + 4,
                self.max_dimension
            );
        }
        if self.strategy == PathStrategy::HeuristicGuided {
            tracing::debug!(
                "heuristic-guided search sums feature costs against score-valued edges; \
                 optimality holds only if the scorer dominates costs"
            );
        }
    }

    pub fn lattice_cfg(&self) -> LatticeCfg {
        LatticeCfg {
            max_dimension: self.max_dimension,
            parallel: self.parallel_scoring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = AcquisitionConfig::default();
        assert_eq!(cfg.strategy, PathStrategy::Plain);
        assert!(!cfg.parallel_scoring);
        assert_eq!(cfg.max_dimension, 24);
        assert_eq!(cfg.seed, 0);
    }

    #[test]
    fn test_partial_json_override() {
        let cfg: AcquisitionConfig =
            serde_json::from_str(r#"{ "parallel_scoring": true }"#).unwrap();
        assert!(cfg.parallel_scoring);
        assert_eq!(cfg.strategy, PathStrategy::Plain);
        assert_eq!(cfg.max_dimension, 24);
    }

    #[test]
    fn test_strategy_variants() {
        let cfg: AcquisitionConfig =
            serde_json::from_str(r#"{ "strategy": { "method": "bellman_ford" } }"#).unwrap();
        assert_eq!(cfg.strategy, PathStrategy::Method(PathMethod::BellmanFord));

        let cfg: AcquisitionConfig =
            serde_json::from_str(r#"{ "strategy": "heuristic_guided", "seed": 7 }"#).unwrap();
        assert_eq!(cfg.strategy, PathStrategy::HeuristicGuided);
        assert_eq!(cfg.seed, 7);

        let cfg: AcquisitionConfig =
            serde_json::from_str(r#"{ "strategy": { "method": "dijkstra" }, "max_dimension": 10 }"#)
                .unwrap();
        assert_eq!(cfg.strategy, PathStrategy::Method(PathMethod::Dijkstra));
        assert_eq!(cfg.lattice_cfg().max_dimension, 10);
    }

    #[test]
    fn test_unknown_strategy_is_an_error() {
        let res: Result<AcquisitionConfig, _> = serde_json::from_str(r#"{ "strategy": "greedy" }"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_validate_large_dimension() {
        // Should log a warning but not panic.
        let cfg = AcquisitionConfig {
            max_dimension: 40,
            ..Default::default()
        };
        cfg.validate();
    }
}
