//! Buy features for a partially observed sample with both strategies.
//!
//! Purpose
//! - Show the end-to-end flow: training data + costs + scorer, then
//!   `buy_features` via graph search (every path strategy) and local search.
//! - The fmt subscriber prints each purchase at info level; warnings flag
//!   suspicious configuration.
//!
//! Scorer
//! - Edge weight = cost of the new feature divided by how strongly its column
//!   correlates with the labels, so informative cheap features are preferred.
//!   Weights are non-negative, which keeps Dijkstra applicable.

use std::sync::Arc;

use acquisition::mocks::{sample_train_data, HillClimbing, RandomRestartHillClimbing};
use acquisition::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;

fn label_correlation(train: &TrainSamples, feature: FeatureIndex) -> f64 {
    let column = train.samples().column(feature);
    let labels = train.classes();
    let n = column.len() as f64;
    let (mx, my) = (column.sum() / n, labels.sum() / n);
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in column.iter().zip(labels.iter()) {
        cov += (x - mx) * (y - my);
        vx += (x - mx) * (x - mx);
        vy += (y - my) * (y - my);
    }
    if vx == 0.0 || vy == 0.0 {
        0.0
    } else {
        cov / (vx.sqrt() * vy.sqrt())
    }
}

fn cost_per_information(
    train: &TrainSamples,
    given: &[FeatureIndex],
    feature: FeatureIndex,
    costs: &[f64],
) -> f64 {
    let depth = given.len() as f64 + 1.0;
    depth * costs[feature] / (1e-3 + label_correlation(train, feature).abs())
}

fn main() -> anyhow::Result<()> {
    SubscriberBuilder::default().with_target(false).init();

    let costs = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let problem = AcquisitionProblem::new(
        Arc::new(sample_train_data()),
        costs,
        Arc::new(cost_per_information),
    )?;
    let given = [0];
    let budget = 10.0;

    for strategy in [
        PathStrategy::Plain,
        PathStrategy::Method(PathMethod::BellmanFord),
        PathStrategy::HeuristicGuided,
    ] {
        let acquirer = GraphSearchAcquirer::new(
            problem.clone(),
            AcquisitionConfig {
                strategy,
                ..Default::default()
            },
        );
        let bought = acquirer.buy_features(&given, budget)?;
        println!("graph search {strategy:?}: {bought:?}");
    }

    let hill = LocalSearchAcquirer::new(
        problem.clone(),
        HillClimbing::default(),
        AcquisitionConfig::default(),
    );
    println!("hill climbing: {:?}", hill.buy_features(&given, budget)?);

    let restarts = LocalSearchAcquirer::new(
        problem,
        RandomRestartHillClimbing {
            restarts: 16,
            ..Default::default()
        },
        AcquisitionConfig {
            seed: 42,
            ..Default::default()
        },
    );
    println!("random restarts: {:?}", restarts.buy_features(&given, budget)?);
    Ok(())
}
