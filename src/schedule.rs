//! Bucket scheduling: greedy largest-first weighted partitioning.
//!
//! Takes the reconciled weight map and produces K buckets whose total
//! weights are as even as the heuristic allows. The scheduling is:
//!
//! 1. **Sort** — files by weight descending, exact ties broken by the
//!    lexicographic order of their paths
//! 2. **Place** — each file goes into the currently lightest bucket,
//!    lowest index winning ties
//!
//! Computing the true minimum makespan is NP-hard; greedy largest-first
//! runs in O(n log n + n·K) and never exceeds 4/3 of the optimal
//! makespan. Every choice point has a fixed tie-break, so reruns on
//! unchanged input reproduce the exact same assignment — CI containers
//! must receive the same subset across retries.

use crate::reconcile::WeightMap;

/// Result of partitioning the weight map into K buckets.
///
/// The buckets partition the weight map's key set: every file appears in
/// exactly one bucket, in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSet {
    /// File membership per bucket, indexed 0..K-1.
    pub buckets: Vec<Vec<String>>,
    /// Total weight per bucket, same indexing.
    pub weights: Vec<f64>,
}

/// Partitions `weights` into `bucket_count` balanced buckets.
///
/// An empty weight map yields `bucket_count` empty buckets of weight 0.
///
/// Panics if `bucket_count` is 0 (callers validate bucket parameters
/// before any scheduling work).
pub fn schedule(weights: &WeightMap, bucket_count: usize) -> BucketSet {
    assert!(bucket_count > 0, "bucket count must be at least 1");

    // Heaviest first; lexicographic on equal weights so the order is a
    // pure function of the input. Weights are finite by construction,
    // and total_cmp totally orders f64 regardless.
    let mut order: Vec<(&str, f64)> = weights
        .iter()
        .map(|(file, &weight)| (file.as_str(), weight))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); bucket_count];
    let mut totals: Vec<f64> = vec![0.0; bucket_count];

    for (file, weight) in order {
        // Strict `<` keeps the lowest index on ties.
        let mut lightest = 0;
        for (idx, &total) in totals.iter().enumerate().skip(1) {
            if total < totals[lightest] {
                lightest = idx;
            }
        }
        buckets[lightest].push(file.to_string());
        totals[lightest] += weight;
    }

    BucketSet {
        buckets,
        weights: totals,
    }
}
