//! Deterministic train/test splitting.
//!
//! Every split is driven by a caller-supplied seed so repeated runs over
//! the same table produce identical models and identical held-out metrics.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use brandlift_common::{BrandliftError, Result};

/// Random split of `n` row indices into (train, test).
///
/// The test partition holds `round(n * test_fraction)` rows, clamped so
/// both partitions are non-empty.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if n < 2 {
        return Err(BrandliftError::Config(format!(
            "need at least 2 rows to split, got {n}"
        )));
    }
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = clamp_test_count(n, test_fraction);
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    Ok((train, test))
}

/// Stratified split: class proportions are preserved in both partitions.
///
/// Labels are compared as integers (binary targets in this workspace).
/// Classes are visited in sorted order so the split is deterministic for a
/// given seed regardless of row order within a class group.
pub fn stratified_split(
    labels: &[i64],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if labels.len() < 2 {
        return Err(BrandliftError::Config(format!(
            "need at least 2 rows to split, got {}",
            labels.len()
        )));
    }

    let mut by_class: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(i);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for indices in by_class.values() {
        let mut indices = indices.clone();
        indices.shuffle(&mut rng);
        if indices.len() < 2 {
            // A singleton class cannot appear on both sides; keep it
            // trainable rather than unlearnable.
            train.extend(indices);
            continue;
        }
        let n_test = clamp_test_count(indices.len(), test_fraction);
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}

fn clamp_test_count(n: usize, test_fraction: f64) -> usize {
    let raw = (n as f64 * test_fraction).round() as usize;
    raw.clamp(1, n - 1)
}
