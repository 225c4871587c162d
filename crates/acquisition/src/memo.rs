//! Memoized score evaluations for one acquisition run.
//!
//! Keys are owned snapshots (`K`) taken at lookup time: a `FeatureSet` for
//! lattice edges, an ordered prefix `Vec<FeatureIndex>` for local search. Later
//! mutation of whatever the caller built the key from cannot change an entry.
//!
//! The compute closure runs while the entry's shard is locked, so concurrent
//! lookups of one key evaluate it at most once. The closure must not call back
//! into the same memoizer.

use std::hash::Hash;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use crate::feature_set::FeatureIndex;

/// Cache of `(state snapshot, candidate feature) -> score`.
pub struct ScoreMemoizer<K: Eq + Hash> {
    scores: DashMap<(K, FeatureIndex), f64>,
    hits: AtomicU32,
    misses: AtomicU32,
}

impl<K: Eq + Hash> Default for ScoreMemoizer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> ScoreMemoizer<K> {
    pub fn new() -> Self {
        Self {
            scores: DashMap::new(),
            hits: AtomicU32::new(0),
            misses: AtomicU32::new(0),
        }
    }

    /// Return the cached score for `(state_key, candidate)` or compute and store it.
    pub fn get_or_compute<F>(&self, state_key: K, candidate: FeatureIndex, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        let key = (state_key, candidate);
        if let Some(score) = self.scores.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *score;
        }
        let mut computed = false;
        let score = *self.scores.entry(key).or_insert_with(|| {
            computed = true;
            compute()
        });
        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            // Another worker filled the entry between `get` and `entry`.
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        score
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Return (hits, misses) counters since last reset.
    pub fn counters(&self) -> (u32, u32) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    pub fn reset_counters(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_set::FeatureSet;
    use rayon::prelude::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn computes_once_per_key() {
        let memo: ScoreMemoizer<FeatureSet> = ScoreMemoizer::new();
        let calls = AtomicUsize::new(0);
        let key: FeatureSet = [0, 1].iter().collect();
        for _ in 0..3 {
            let s = memo.get_or_compute(key.clone(), 2, || {
                calls.fetch_add(1, Ordering::Relaxed);
                0.5
            });
            assert!((s - 0.5).abs() < 1e-12);
        }
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(memo.counters(), (2, 1));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn candidate_is_part_of_the_key() {
        let memo: ScoreMemoizer<FeatureSet> = ScoreMemoizer::new();
        let key: FeatureSet = [0].iter().collect();
        let a = memo.get_or_compute(key.clone(), 1, || 1.0);
        let b = memo.get_or_compute(key, 2, || 2.0);
        assert_eq!((a, b), (1.0, 2.0));
        assert_eq!(memo.counters(), (0, 2));
    }

    #[test]
    fn key_snapshot_survives_caller_mutation() {
        // The prefix the caller keeps extending must not rewrite stored keys.
        let memo: ScoreMemoizer<Vec<FeatureIndex>> = ScoreMemoizer::new();
        let mut prefix = vec![0];
        memo.get_or_compute(prefix.clone(), 1, || 1.0);
        prefix.push(1);
        memo.get_or_compute(prefix.clone(), 2, || 2.0);
        assert_eq!(memo.get_or_compute(vec![0], 1, || 99.0), 1.0);
        assert_eq!(memo.get_or_compute(vec![0, 1], 2, || 99.0), 2.0);
        assert_eq!(memo.counters(), (2, 2));
    }

    #[test]
    fn concurrent_population_is_at_most_once() {
        let memo: ScoreMemoizer<FeatureSet> = ScoreMemoizer::new();
        let calls = AtomicUsize::new(0);
        (0..256usize).into_par_iter().for_each(|i| {
            let key: FeatureSet = [i % 4].iter().collect();
            memo.get_or_compute(key, 7, || {
                calls.fetch_add(1, Ordering::Relaxed);
                (i % 4) as f64
            });
        });
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        assert_eq!(memo.len(), 4);
        let (hits, misses) = memo.counters();
        assert_eq!((hits + misses, misses), (256, 4));
    }

    #[test]
    fn reset_counters() {
        let memo: ScoreMemoizer<FeatureSet> = ScoreMemoizer::new();
        memo.get_or_compute(FeatureSet::empty(), 0, || 0.0);
        memo.get_or_compute(FeatureSet::empty(), 0, || 0.0);
        assert_eq!(memo.counters(), (1, 1));
        memo.reset_counters();
        assert_eq!(memo.counters(), (0, 0));
    }
}
