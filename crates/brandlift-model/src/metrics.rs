//! Held-out evaluation metrics.

use brandlift_common::{BrandliftError, Result};

/// Rank-based ROC AUC (Mann–Whitney formulation) with average ranks for
/// tied scores.
///
/// Fails with a label-degeneracy error when the evaluation slice holds
/// only one class — an AUC over a single class is undefined, not 0.5.
pub fn roc_auc(labels: &[f64], scores: &[f64]) -> Result<f64> {
    let n_pos = labels.iter().filter(|&&y| y > 0.5).count();
    let n_neg = labels.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        let classes = if n_pos == 0 { vec![0] } else { vec![1] };
        return Err(BrandliftError::DegenerateLabel {
            column: "held-out labels".to_string(),
            classes,
        });
    }

    // Average ranks over the score ordering, ties share their mean rank.
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && (scores[order[j + 1]] - scores[order[i]]).abs() < 1e-12 {
            j += 1;
        }
        let avg_rank = (i + 1 + j + 1) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg_rank;
        }
        i = j + 1;
    }

    let pos_rank_sum: f64 = labels
        .iter()
        .zip(ranks.iter())
        .filter(|(&y, _)| y > 0.5)
        .map(|(_, &r)| r)
        .sum();

    let auc = (pos_rank_sum - (n_pos * (n_pos + 1)) as f64 / 2.0) / (n_pos * n_neg) as f64;
    Ok(auc)
}

/// Mean absolute error.
pub fn mean_absolute_error(truth: &[f64], predicted: &[f64]) -> Result<f64> {
    if truth.is_empty() {
        return Err(BrandliftError::EmptyTable {
            context: "mean_absolute_error".to_string(),
        });
    }
    let sum: f64 = truth
        .iter()
        .zip(predicted.iter())
        .map(|(t, p)| (t - p).abs())
        .sum();
    Ok(sum / truth.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_ranking_is_auc_one() {
        let labels = [0.0, 0.0, 1.0, 1.0];
        let scores = [0.1, 0.2, 0.8, 0.9];
        assert!((roc_auc(&labels, &scores).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_ranking_is_auc_zero() {
        let labels = [1.0, 1.0, 0.0, 0.0];
        let scores = [0.1, 0.2, 0.8, 0.9];
        assert!(roc_auc(&labels, &scores).unwrap().abs() < 1e-12);
    }

    #[test]
    fn tied_scores_give_half_credit() {
        let labels = [0.0, 1.0];
        let scores = [0.5, 0.5];
        assert!((roc_auc(&labels, &scores).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_class_auc_is_an_error() {
        let err = roc_auc(&[1.0, 1.0], &[0.3, 0.7]).unwrap_err();
        assert!(matches!(
            err,
            BrandliftError::DegenerateLabel { .. }
        ));
    }

    #[test]
    fn mae_of_exact_predictions_is_zero() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(mean_absolute_error(&y, &y).unwrap(), 0.0);
        assert_eq!(
            mean_absolute_error(&[1.0, 3.0], &[2.0, 1.0]).unwrap(),
            1.5
        );
    }
}
