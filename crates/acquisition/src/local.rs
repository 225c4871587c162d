//! Local-search formulation of feature acquisition.
//!
//! Purpose
//! - Expose the four primitives a generic local-search driver needs
//!   (`actions`, `transition`, `value`, `random_state`) over the same state
//!   space as the lattice, without materializing it.
//!
//! Model
//! - A state is the acquisition order: the given features followed by the
//!   features bought so far. Actions append one missing feature.
//! - `value` is the cumulative marginal score along that order when the state
//!   fits the budget, and `-inf` otherwise. Infeasible states stay reachable.
//! - The search loop itself belongs to a [`LocalSearchDriver`] supplied by the
//!   caller.

use rand::{Rng, RngCore};

use crate::data::{ScoreFunction, TrainSamples};
use crate::feature_set::{FeatureIndex, FeatureSet};
use crate::memo::ScoreMemoizer;

/// Features in the order they were (hypothetically) acquired.
pub type AcquisitionState = Vec<FeatureIndex>;

/// State-space contract consumed by local-search drivers.
pub trait StateSpace {
    type State: Clone;

    /// Candidate successor states of `state`.
    fn actions(&self, state: &Self::State) -> Vec<Self::State>;

    /// State reached by applying `action` to `state`.
    fn transition(&self, state: &Self::State, action: Self::State) -> Self::State;

    /// Objective to maximize; `f64::NEG_INFINITY` marks invalid states.
    fn value(&self, state: &Self::State) -> f64;

    /// A state drawn independently of the current search position.
    fn random_state(&self, rng: &mut dyn RngCore) -> Self::State;
}

/// External optimization loop over a [`StateSpace`].
pub trait LocalSearchDriver {
    fn optimize<S: StateSpace>(
        &self,
        space: &S,
        initial: S::State,
        rng: &mut dyn RngCore,
    ) -> S::State;
}

/// Feature acquisition under a budget, as a local-search problem.
pub struct FeaturesProblem<'a> {
    train_samples: &'a TrainSamples,
    score_function: &'a dyn ScoreFunction,
    costs: &'a [f64],
    given: Vec<FeatureIndex>,
    given_set: FeatureSet,
    total_features: usize,
    budget: f64,
    scores: ScoreMemoizer<Vec<FeatureIndex>>,
}

impl<'a> FeaturesProblem<'a> {
    /// `given` must already be validated (in range, duplicate-free).
    pub fn new(
        train_samples: &'a TrainSamples,
        score_function: &'a dyn ScoreFunction,
        costs: &'a [f64],
        given: Vec<FeatureIndex>,
        budget: f64,
    ) -> Self {
        let given_set = given.iter().collect();
        Self {
            train_samples,
            score_function,
            costs,
            given,
            given_set,
            total_features: train_samples.features_num(),
            budget,
            scores: ScoreMemoizer::new(),
        }
    }

    /// The state every search starts from: just the given features.
    pub fn initial_state(&self) -> AcquisitionState {
        self.given.clone()
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Features of `state` beyond the given set, in acquisition order.
    pub fn acquired<'s>(
        &'s self,
        state: &'s [FeatureIndex],
    ) -> impl Iterator<Item = FeatureIndex> + 's {
        let mut seen = self.given_set.clone();
        state.iter().copied().filter(move |&f| {
            if seen.contains(f) {
                false
            } else {
                seen = seen.with(f);
                true
            }
        })
    }

    /// Score cache (hits, misses) for this problem.
    pub fn score_counters(&self) -> (u32, u32) {
        self.scores.counters()
    }

    fn is_valid_state(&self, state: &[FeatureIndex]) -> bool {
        let members: FeatureSet = state.iter().collect();
        members.cost(self.costs) <= self.budget
    }

    fn calculate_score(&self, state: &[FeatureIndex]) -> f64 {
        let mut prefix = self.given.clone();
        let mut total = 0.0;
        for feature in self.acquired(state) {
            total += self.scores.get_or_compute(prefix.clone(), feature, || {
                self.score_function
                    .score(self.train_samples, &prefix, feature, self.costs)
            });
            prefix.push(feature);
        }
        total
    }
}

impl StateSpace for FeaturesProblem<'_> {
    type State = AcquisitionState;

    fn actions(&self, state: &AcquisitionState) -> Vec<AcquisitionState> {
        let members: FeatureSet = state.iter().collect();
        (0..self.total_features)
            .filter(|&f| !members.contains(f))
            .map(|f| {
                let mut next = state.clone();
                next.push(f);
                next
            })
            .collect()
    }

    fn transition(
        &self,
        _state: &AcquisitionState,
        action: AcquisitionState,
    ) -> AcquisitionState {
        action
    }

    fn value(&self, state: &AcquisitionState) -> f64 {
        if self.is_valid_state(state) {
            self.calculate_score(state)
        } else {
            f64::NEG_INFINITY
        }
    }

    fn random_state(&self, rng: &mut dyn RngCore) -> AcquisitionState {
        // Each complement feature independently with p = 1/2: uniform over the powerset.
        let mut state = self.given.clone();
        for f in 0..self.total_features {
            if !self.given_set.contains(f) && rng.gen_bool(0.5) {
                state.push(f);
            }
        }
        state
    }
}
