//! Read-only training data and the scoring collaborator.
//!
//! - `TrainSamples`: sample matrix (rows = samples, columns = features) plus labels.
//! - `ScoreFunction`: marginal value of adding one feature to an existing set.

use nalgebra::{DMatrix, DVector};

use crate::error::{AcquisitionError, Result};
use crate::feature_set::FeatureIndex;

/// Training samples shared by every score evaluation of one acquisition run.
#[derive(Clone, Debug)]
pub struct TrainSamples {
    samples: DMatrix<f64>,
    classes: DVector<f64>,
}

impl TrainSamples {
    /// Pair a sample matrix with its labels. Row count must match label count.
    pub fn new(samples: DMatrix<f64>, classes: DVector<f64>) -> Result<Self> {
        if samples.nrows() != classes.len() {
            return Err(AcquisitionError::invalid(format!(
                "{} samples but {} labels",
                samples.nrows(),
                classes.len()
            )));
        }
        Ok(Self { samples, classes })
    }

    /// Build from row-major rows; all rows must share one width.
    pub fn from_rows(rows: &[Vec<f64>], classes: &[f64]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(AcquisitionError::invalid(format!(
                "row {bad} has {} columns, expected {width}",
                rows[bad].len()
            )));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(
            DMatrix::from_row_slice(rows.len(), width, &flat),
            DVector::from_column_slice(classes),
        )
    }

    pub fn samples(&self) -> &DMatrix<f64> {
        &self.samples
    }

    pub fn classes(&self) -> &DVector<f64> {
        &self.classes
    }

    /// Total feature count (matrix columns).
    pub fn features_num(&self) -> usize {
        self.samples.ncols()
    }
}

/// Marginal score of acquiring `new_feature` on top of `given_features`.
///
/// Implementations must be deterministic per call and free of side effects;
/// results are memoized and may be evaluated from several rayon workers.
pub trait ScoreFunction: Send + Sync {
    fn score(
        &self,
        train_samples: &TrainSamples,
        given_features: &[FeatureIndex],
        new_feature: FeatureIndex,
        costs: &[f64],
    ) -> f64;
}

impl<F> ScoreFunction for F
where
    F: Fn(&TrainSamples, &[FeatureIndex], FeatureIndex, &[f64]) -> f64 + Send + Sync,
{
    fn score(
        &self,
        train_samples: &TrainSamples,
        given_features: &[FeatureIndex],
        new_feature: FeatureIndex,
        costs: &[f64],
    ) -> f64 {
        self(train_samples, given_features, new_feature, costs)
    }
}
