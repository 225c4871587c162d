//! Criterion microbenches for lattice construction and path search.
//!
//! - Lattice build over 8–14 free features, sequential vs rayon edge scoring.
//! - Shortest path per strategy on a fixed 12-dimensional lattice.
//! - Full `buy_features` for both strategies on the sample data.
//!
//! Results live under `target/criterion`.

use std::hint::black_box;
use std::sync::Arc;

use acquisition::mocks::{sample_train_data, DepthWeightedCost, HillClimbing};
use acquisition::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn depth_weighted(costs: &[f64]) -> impl Fn(&FeatureSet, FeatureIndex) -> f64 + Sync + '_ {
    move |source, f| costs[f] * (source.len() as f64 + 1.0)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice_build");
    group.sample_size(20);
    for dim in [8usize, 11, 14] {
        let total = dim + 1;
        let costs: Vec<f64> = (1..=total).map(|c| c as f64).collect();
        let given: FeatureSet = [0].iter().collect();
        for parallel in [false, true] {
            let cfg = LatticeCfg {
                parallel,
                ..LatticeCfg::default()
            };
            let label = if parallel { "par" } else { "seq" };
            group.bench_with_input(BenchmarkId::new(label, dim), &dim, |b, _| {
                b.iter(|| {
                    let lattice =
                        build_lattice(total, &given, depth_weighted(&costs), cfg).unwrap();
                    black_box(lattice.edge_count())
                })
            });
        }
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");
    let total = 13;
    let costs: Vec<f64> = (1..=total).map(|c| c as f64).collect();
    let given: FeatureSet = [0].iter().collect();
    let lattice =
        build_lattice(total, &given, depth_weighted(&costs), LatticeCfg::default()).unwrap();
    for (name, strategy) in [
        ("dijkstra", PathStrategy::Plain),
        ("bellman_ford", PathStrategy::Method(PathMethod::BellmanFord)),
        ("astar", PathStrategy::HeuristicGuided),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(shortest_path(&lattice, strategy, &costs).unwrap().len()))
        });
    }
    group.finish();
}

fn bench_buy(c: &mut Criterion) {
    let mut group = c.benchmark_group("buy_features");
    let problem = AcquisitionProblem::new(
        Arc::new(sample_train_data()),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        Arc::new(DepthWeightedCost),
    )
    .unwrap();
    let graph = GraphSearchAcquirer::new(problem.clone(), AcquisitionConfig::default());
    let local =
        LocalSearchAcquirer::new(problem, HillClimbing::default(), AcquisitionConfig::default());
    group.bench_function("graph_search", |b| {
        b.iter(|| black_box(graph.buy_features(&[0], 10.0).unwrap()))
    });
    group.bench_function("local_search", |b| {
        b.iter(|| black_box(local.buy_features(&[0], 10.0).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_search, bench_buy);
criterion_main!(benches);
