//! Test doubles for the scoring collaborator and the local-search driver.
//!
//! The library never runs an optimization loop itself; the drivers here stand
//! in for an external one in tests, benches and the example.

use rand::RngCore;

use crate::data::{ScoreFunction, TrainSamples};
use crate::feature_set::FeatureIndex;
use crate::local::{LocalSearchDriver, StateSpace};

/// Five samples over six features (last column of each row is the label).
pub fn sample_train_data() -> TrainSamples {
    let rows = [
        [1.0, 0.11, 0.05, 78.0, 32.0, 12.0, 4231.0],
        [0.0, 3.6, 5.4, 4.32, 432.2, 21.4, 43.21],
        [1.0, 2.0, 0.0, 43.0, 21.0, 245.0, 4.231],
        [1.0, 22.0, 32.0, 6.0, 3.45, 62.4, 2.2],
        [62.0, 32.0, 12.0, 214.0, 215.0, 53.215, 21.0],
    ];
    let samples: Vec<Vec<f64>> = rows.iter().map(|r| r[..6].to_vec()).collect();
    let classes: Vec<f64> = rows.iter().map(|r| r[6]).collect();
    TrainSamples::from_rows(&samples, &classes).expect("fixture rows share one width")
}

/// Scores every candidate the same.
#[derive(Clone, Copy, Debug)]
pub struct ConstantScore(pub f64);

impl ScoreFunction for ConstantScore {
    fn score(&self, _: &TrainSamples, _: &[FeatureIndex], _: FeatureIndex, _: &[f64]) -> f64 {
        self.0
    }
}

/// `costs[f] * (|given| + 1)`: later acquisitions weigh more.
///
/// On the lattice the cheapest path buys the most expensive feature first,
/// and the ordering is strict when costs are distinct.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthWeightedCost;

impl ScoreFunction for DepthWeightedCost {
    fn score(
        &self,
        _: &TrainSamples,
        given_features: &[FeatureIndex],
        new_feature: FeatureIndex,
        costs: &[f64],
    ) -> f64 {
        costs[new_feature] * (given_features.len() as f64 + 1.0)
    }
}

/// Steepest-ascent hill climbing; stops when no action strictly improves.
#[derive(Clone, Copy, Debug, Default)]
pub struct HillClimbing {
    pub max_iterations: Option<usize>,
}

impl LocalSearchDriver for HillClimbing {
    fn optimize<S: StateSpace>(
        &self,
        space: &S,
        initial: S::State,
        _rng: &mut dyn RngCore,
    ) -> S::State {
        let mut current = initial;
        let mut current_value = space.value(&current);
        let mut iterations = 0;
        while self.max_iterations.map_or(true, |max| iterations < max) {
            iterations += 1;
            let mut best: Option<(S::State, f64)> = None;
            for action in space.actions(&current) {
                let next = space.transition(&current, action);
                let v = space.value(&next);
                if best.as_ref().map_or(true, |(_, b)| v > *b) {
                    best = Some((next, v));
                }
            }
            match best {
                Some((next, v)) if v > current_value => {
                    current = next;
                    current_value = v;
                }
                _ => break,
            }
        }
        current
    }
}

/// Hill climbing from the initial state, then from `restarts` random states;
/// keeps the best result.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomRestartHillClimbing {
    pub restarts: usize,
    pub climber: HillClimbing,
}

impl LocalSearchDriver for RandomRestartHillClimbing {
    fn optimize<S: StateSpace>(
        &self,
        space: &S,
        initial: S::State,
        rng: &mut dyn RngCore,
    ) -> S::State {
        let mut best = self.climber.optimize(space, initial, rng);
        let mut best_value = space.value(&best);
        for _ in 0..self.restarts {
            let start = space.random_state(rng);
            let candidate = self.climber.optimize(space, start, rng);
            let v = space.value(&candidate);
            if v > best_value {
                best = candidate;
                best_value = v;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::FeaturesProblem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const COSTS: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    #[test]
    fn sample_data_has_six_features() {
        let data = sample_train_data();
        assert_eq!(data.features_num(), 6);
        assert_eq!(data.classes().len(), 5);
        assert_eq!(data.classes()[0], 4231.0);
    }

    #[test]
    fn hill_climbing_follows_steepest_ascent() {
        let data = sample_train_data();
        let score = DepthWeightedCost;
        let problem = FeaturesProblem::new(&data, &score, &COSTS, vec![0], 10.0);
        let mut rng = StdRng::seed_from_u64(0);
        let state = HillClimbing::default().optimize(&problem, problem.initial_state(), &mut rng);
        // [0] -> [0,5] (12) -> [0,5,2] (21); every extension then exceeds the budget.
        assert_eq!(state, vec![0, 5, 2]);
    }

    #[test]
    fn iteration_limit_is_respected() {
        let data = sample_train_data();
        let score = DepthWeightedCost;
        let problem = FeaturesProblem::new(&data, &score, &COSTS, vec![0], 10.0);
        let mut rng = StdRng::seed_from_u64(0);
        let climber = HillClimbing {
            max_iterations: Some(1),
        };
        let state = climber.optimize(&problem, problem.initial_state(), &mut rng);
        assert_eq!(state, vec![0, 5]);
    }

    #[test]
    fn restarts_never_lose_the_first_climb() {
        let data = sample_train_data();
        let score = DepthWeightedCost;
        let problem = FeaturesProblem::new(&data, &score, &COSTS, vec![0], 10.0);
        let mut rng = StdRng::seed_from_u64(3);
        let driver = RandomRestartHillClimbing {
            restarts: 8,
            ..Default::default()
        };
        let state = driver.optimize(&problem, problem.initial_state(), &mut rng);
        assert!(problem.value(&state) >= 21.0);
        assert_eq!(state[0], 0);
    }
}
