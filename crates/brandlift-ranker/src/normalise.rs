//! Score normalisation.

/// Min-max normalisation of a column to [0, 1].
///
/// A constant column (max == min) maps every row to 0.5 — a neutral
/// midpoint that keeps the weighted sum finite instead of dividing by
/// zero.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let Some(first) = values.first() else {
        return vec![];
    };
    let (min, max) = values.iter().fold((*first, *first), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    if (max - min).abs() < f64::EPSILON {
        return vec![0.5; values.len()];
    }
    values.iter().map(|&v| (v - min) / (max - min)).collect()
}
