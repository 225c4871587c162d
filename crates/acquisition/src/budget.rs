//! Truncating an acquisition path at the budget boundary.

use crate::feature_set::FeatureIndex;
use crate::search::AcquisitionPath;

/// Walk `path` in order and keep each added feature while the budget lasts.
///
/// Stops at the first feature whose cost would take the remaining budget
/// below zero; cheaper features later on the path are not considered. The
/// result always starts with `given`, unchanged.
pub fn fulfill(
    given: &[FeatureIndex],
    path: &AcquisitionPath,
    budget: f64,
    costs: &[f64],
) -> Vec<FeatureIndex> {
    let mut bought = given.to_vec();
    let mut remaining = budget;
    for feature in path.added_features() {
        remaining -= costs.get(feature).copied().unwrap_or(f64::INFINITY);
        if remaining < 0.0 {
            break;
        }
        bought.push(feature);
    }
    bought
}
