//! Feature lattice: subsets of features above a given set, as a weighted DAG.
//!
//! Purpose
//! - Materialize every `given ∪ s` (s ranging over the powerset of the
//!   complement) as a node and every one-feature extension as an edge weighted
//!   by the scoring collaborator.
//! - Hand the resulting `petgraph` graph to the path search in `crate::search`.
//!
//! Notes
//! - Node count is `2^d` and edge count `d·2^(d-1)` for `d = total - |given|`;
//!   `LatticeCfg::max_dimension` (default 24) turns larger requests into
//!   `AcquisitionError::CapacityExceeded` instead of exhausting memory.
//! - Enumeration order is reproducible: complement subsets by increasing size,
//!   then lexicographically by feature index.

mod build;
mod types;

pub use build::build_lattice;
pub use types::{Edge, FeatureLattice, LatticeCfg, DEFAULT_MAX_DIMENSION};
