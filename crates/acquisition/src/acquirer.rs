//! `buy_features` entry points: graph search and local search.
//!
//! Purpose
//! - Bind training data, per-feature costs and a scorer into an
//!   [`AcquisitionProblem`] once, then answer `buy_features(given, budget)`
//!   with either strategy behind the [`FeatureAcquirer`] trait.
//!
//! Model
//! - Graph search: lattice over `given` (edge weights memoized per
//!   `(FeatureSet, feature)`), shortest path by the configured
//!   [`PathStrategy`](crate::config::PathStrategy), then `fulfill`.
//! - Local search: a [`FeaturesProblem`] handed to the caller's
//!   [`LocalSearchDriver`]; the returned acquisition order goes through the
//!   same `fulfill` rule, so both strategies respect the budget and return
//!   every given feature exactly once.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::budget::fulfill;
use crate::config::AcquisitionConfig;
use crate::data::{ScoreFunction, TrainSamples};
use crate::error::{AcquisitionError, Result};
use crate::feature_set::{FeatureIndex, FeatureSet};
use crate::lattice::{self, FeatureLattice};
use crate::local::{FeaturesProblem, LocalSearchDriver};
use crate::memo::ScoreMemoizer;
use crate::search::{self, AcquisitionPath};

/// Strategy-independent purchase decision.
pub trait FeatureAcquirer {
    /// Features to hold after spending at most `budget`, starting with `given`.
    fn buy_features(&self, given: &[FeatureIndex], budget: f64) -> Result<Vec<FeatureIndex>>;
}

/// Validated training data, costs and scorer shared by every query.
#[derive(Clone)]
pub struct AcquisitionProblem {
    train_samples: Arc<TrainSamples>,
    costs: Vec<f64>,
    score_function: Arc<dyn ScoreFunction>,
}

impl AcquisitionProblem {
    /// One finite, non-negative cost per training feature.
    pub fn new(
        train_samples: Arc<TrainSamples>,
        costs: Vec<f64>,
        score_function: Arc<dyn ScoreFunction>,
    ) -> Result<Self> {
        let features = train_samples.features_num();
        if costs.len() != features {
            return Err(AcquisitionError::CostCountMismatch {
                costs: costs.len(),
                features,
            });
        }
        if let Some((feature, &cost)) = costs
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(AcquisitionError::InvalidCost { feature, cost });
        }
        Ok(Self {
            train_samples,
            costs,
            score_function,
        })
    }

    pub fn train_samples(&self) -> &TrainSamples {
        &self.train_samples
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    pub fn features_num(&self) -> usize {
        self.train_samples.features_num()
    }

    /// Marginal score of `new_feature` on top of `given`, straight from the scorer.
    pub fn score(&self, given: &[FeatureIndex], new_feature: FeatureIndex) -> f64 {
        self.score_function
            .score(&self.train_samples, given, new_feature, &self.costs)
    }

    /// Range-check `given` and drop repeats, keeping first occurrences.
    pub fn validate_given(&self, given: &[FeatureIndex]) -> Result<Vec<FeatureIndex>> {
        let total = self.features_num();
        let mut seen = FeatureSet::empty();
        let mut out = Vec::with_capacity(given.len());
        for &feature in given {
            if feature >= total {
                return Err(AcquisitionError::FeatureOutOfRange { feature, total });
            }
            if !seen.contains(feature) {
                seen = seen.with(feature);
                out.push(feature);
            }
        }
        if out.len() < given.len() {
            tracing::debug!(
                dropped = given.len() - out.len(),
                "duplicate given features ignored"
            );
        }
        Ok(out)
    }
}

fn warn_on_empty_budget(given: &[FeatureIndex], budget: f64) {
    if budget <= 0.0 {
        tracing::warn!(budget, given = ?given, "no budget to spend; keeping the given features");
    }
}

/// Lattice + shortest path + budget truncation.
#[derive(Clone)]
pub struct GraphSearchAcquirer {
    problem: AcquisitionProblem,
    config: AcquisitionConfig,
}

impl GraphSearchAcquirer {
    pub fn new(problem: AcquisitionProblem, config: AcquisitionConfig) -> Self {
        config.validate();
        Self { problem, config }
    }

    pub fn problem(&self) -> &AcquisitionProblem {
        &self.problem
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Weighted lattice above `given`; each edge scored once.
    pub fn build_lattice(&self, given: &[FeatureIndex]) -> Result<FeatureLattice> {
        let given = self.problem.validate_given(given)?;
        let given_set: FeatureSet = given.iter().collect();
        let memo: ScoreMemoizer<FeatureSet> = ScoreMemoizer::new();
        let problem = &self.problem;
        let lattice = lattice::build_lattice(
            problem.features_num(),
            &given_set,
            |source: &FeatureSet, f: FeatureIndex| {
                memo.get_or_compute(source.clone(), f, || problem.score(&source.to_vec(), f))
            },
            self.config.lattice_cfg(),
        )?;
        let (hits, misses) = memo.counters();
        tracing::debug!(hits, misses, "edge score cache");
        Ok(lattice)
    }

    /// Shortest path over `lattice` with the configured strategy.
    pub fn shortest_path(&self, lattice: &FeatureLattice) -> Result<AcquisitionPath> {
        search::shortest_path(lattice, self.config.strategy, self.problem.costs())
    }
}

impl FeatureAcquirer for GraphSearchAcquirer {
    fn buy_features(&self, given: &[FeatureIndex], budget: f64) -> Result<Vec<FeatureIndex>> {
        let given = self.problem.validate_given(given)?;
        warn_on_empty_budget(&given, budget);
        let lattice = self.build_lattice(&given)?;
        let path = self.shortest_path(&lattice)?;
        let bought = fulfill(&given, &path, budget, self.problem.costs());
        tracing::info!(
            strategy = ?self.config.strategy,
            budget,
            bought = ?bought,
            "features bought via graph search"
        );
        Ok(bought)
    }
}

/// State space handed to an external driver, result truncated at the budget.
pub struct LocalSearchAcquirer<D> {
    problem: AcquisitionProblem,
    driver: D,
    config: AcquisitionConfig,
}

impl<D: LocalSearchDriver> LocalSearchAcquirer<D> {
    pub fn new(problem: AcquisitionProblem, driver: D, config: AcquisitionConfig) -> Self {
        config.validate();
        Self {
            problem,
            driver,
            config,
        }
    }

    pub fn problem(&self) -> &AcquisitionProblem {
        &self.problem
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: LocalSearchDriver> FeatureAcquirer for LocalSearchAcquirer<D> {
    fn buy_features(&self, given: &[FeatureIndex], budget: f64) -> Result<Vec<FeatureIndex>> {
        let given = self.problem.validate_given(given)?;
        warn_on_empty_budget(&given, budget);
        let space = FeaturesProblem::new(
            &self.problem.train_samples,
            &*self.problem.score_function,
            &self.problem.costs,
            given.clone(),
            budget,
        );
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let state = self.driver.optimize(&space, space.initial_state(), &mut rng);
        let (hits, misses) = space.score_counters();
        tracing::debug!(hits, misses, state = ?state, "local search finished");

        let given_set: FeatureSet = given.iter().collect();
        let path = AcquisitionPath::from_order(&given_set, &state);
        let bought = fulfill(&given, &path, budget, self.problem.costs());
        tracing::info!(budget, bought = ?bought, "features bought via local search");
        Ok(bought)
    }
}
