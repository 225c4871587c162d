//! Budgeted feature acquisition over the lattice of feature subsets.
//!
//! Given partially observed features, per-feature costs and a scorer, decide
//! which features to buy before classification.
//!
//! Layout
//! - `feature_set`: canonical subset identity (bitmask, ordered-set fallback).
//! - `lattice`: every superset of `given` as a weighted `petgraph` DAG.
//! - `memo`: at-most-once score evaluation, safe under rayon fan-out.
//! - `search`: Dijkstra / Bellman–Ford / A* over the lattice.
//! - `budget`: greedy truncation of a path at the budget.
//! - `local`: the same state space for an external local-search driver.
//! - `acquirer`: `buy_features` for both strategies.
//!
//! API Policy
//! - Classifier training and dataset loading live outside this crate; callers
//!   provide a [`ScoreFunction`] and [`TrainSamples`].

pub mod acquirer;
pub mod budget;
pub mod config;
pub mod data;
pub mod error;
pub mod feature_set;
pub mod lattice;
pub mod local;
pub mod memo;
pub mod mocks;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use acquirer::{AcquisitionProblem, FeatureAcquirer, GraphSearchAcquirer, LocalSearchAcquirer};
pub use config::{AcquisitionConfig, PathMethod, PathStrategy};
pub use data::{ScoreFunction, TrainSamples};
pub use error::{AcquisitionError, Result};
pub use feature_set::{FeatureIndex, FeatureSet};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::acquirer::{
        AcquisitionProblem, FeatureAcquirer, GraphSearchAcquirer, LocalSearchAcquirer,
    };
    pub use crate::budget::fulfill;
    pub use crate::config::{AcquisitionConfig, PathMethod, PathStrategy};
    pub use crate::data::{ScoreFunction, TrainSamples};
    pub use crate::error::{AcquisitionError, Result};
    pub use crate::feature_set::{FeatureIndex, FeatureSet};
    pub use crate::lattice::{build_lattice, FeatureLattice, LatticeCfg};
    pub use crate::local::{AcquisitionState, FeaturesProblem, LocalSearchDriver, StateSpace};
    pub use crate::memo::ScoreMemoizer;
    pub use crate::search::{features_costs_heuristic, shortest_path, AcquisitionPath};
}
