//! Errors surfaced by lattice construction, path search and acquisition.

use crate::feature_set::FeatureIndex;

/// Errors shared by every acquisition entry point.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    /// Inconsistent inputs (sample/label shapes, config values).
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A given or requested feature index is outside `[0, total)`.
    #[error("feature {feature} is out of range (total features: {total})")]
    FeatureOutOfRange { feature: FeatureIndex, total: usize },

    /// A feature cost is negative or not finite.
    #[error("feature {feature} has invalid cost {cost}")]
    InvalidCost { feature: FeatureIndex, cost: f64 },

    #[error("cost vector has {costs} entries but the training data has {features} features")]
    CostCountMismatch { costs: usize, features: usize },

    /// More given features than features exist.
    #[error("{given} given features exceed the {total} available")]
    GivenExceedsTotal { given: usize, total: usize },

    /// The lattice would have `2^dimension` nodes, beyond the configured ceiling.
    #[error("lattice dimension {dimension} exceeds the capacity limit of {limit}")]
    CapacityExceeded { dimension: usize, limit: usize },

    /// Dijkstra was selected but the scorer produced a negative edge weight.
    #[error("edge weight {weight} is negative; select Bellman-Ford for signed scores")]
    NegativeWeight { weight: f64 },

    #[error("negative cycle reported in an acyclic feature lattice")]
    NegativeCycle,

    /// The full feature set was not reachable from the given set.
    #[error("target node unreachable from source: feature lattice is incomplete")]
    TargetUnreachable,
}

impl AcquisitionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AcquisitionError>;
