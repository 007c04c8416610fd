//! Gradient-boosted shallow regression trees.
//!
//! One ensemble implementation with two fronts: a binary classifier
//! (logistic loss, emits positive-class probabilities) and a regressor
//! (squared loss). Trees are depth-limited and fit to pseudo-residuals;
//! leaf values are residual means scaled by the learning rate. Fitting is
//! fully deterministic — there is no row or feature subsampling, so a
//! given matrix always yields the same model.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Boosting hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbTreeParams {
    pub rounds: usize,
    pub max_depth: usize,
    pub learning_rate: f64,
    /// Minimum rows on each side of a split.
    pub min_leaf: usize,
}

impl GbTreeParams {
    /// Classifier defaults: 50 shallow trees.
    pub fn classifier() -> Self {
        Self {
            rounds: 50,
            max_depth: 3,
            learning_rate: 0.1,
            min_leaf: 2,
        }
    }

    /// Regressor defaults: 100 shallow trees.
    pub fn regressor() -> Self {
        Self {
            rounds: 100,
            max_depth: 3,
            learning_rate: 0.1,
            min_leaf: 2,
        }
    }
}

// ── Single regression tree ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Tree {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        gain: f64,
        left: Box<Tree>,
        right: Box<Tree>,
    },
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl Tree {
    fn fit(x: &Array2<f64>, targets: &[f64], rows: &[usize], depth: usize, min_leaf: usize) -> Tree {
        let value = mean(targets, rows);
        if depth == 0 || rows.len() < 2 * min_leaf {
            return Tree::Leaf { value };
        }
        let Some(best) = best_split(x, targets, rows, min_leaf) else {
            return Tree::Leaf { value };
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .copied()
            .partition(|&i| x[[i, best.feature]] <= best.threshold);

        Tree::Split {
            feature: best.feature,
            threshold: best.threshold,
            gain: best.gain,
            left: Box::new(Tree::fit(x, targets, &left_rows, depth - 1, min_leaf)),
            right: Box::new(Tree::fit(x, targets, &right_rows, depth - 1, min_leaf)),
        }
    }

    fn predict_row(&self, x: &Array2<f64>, i: usize) -> f64 {
        match self {
            Tree::Leaf { value } => *value,
            Tree::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                if x[[i, *feature]] <= *threshold {
                    left.predict_row(x, i)
                } else {
                    right.predict_row(x, i)
                }
            }
        }
    }

    fn accumulate_gain(&self, out: &mut [f64]) {
        if let Tree::Split {
            feature,
            gain,
            left,
            right,
            ..
        } = self
        {
            out[*feature] += gain;
            left.accumulate_gain(out);
            right.accumulate_gain(out);
        }
    }
}

fn mean(targets: &[f64], rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|&i| targets[i]).sum::<f64>() / rows.len() as f64
}

/// Exhaustive best split over every feature: maximise SSE reduction.
fn best_split(x: &Array2<f64>, targets: &[f64], rows: &[usize], min_leaf: usize) -> Option<BestSplit> {
    let n = rows.len() as f64;
    let total_sum: f64 = rows.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = rows.iter().map(|&i| targets[i] * targets[i]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n;

    let mut best: Option<BestSplit> = None;
    for feature in 0..x.ncols() {
        let mut pairs: Vec<(f64, f64)> = rows
            .iter()
            .map(|&i| (x[[i, feature]], targets[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 1..pairs.len() {
            left_sum += pairs[k - 1].1;
            left_sq += pairs[k - 1].1 * pairs[k - 1].1;

            if pairs[k - 1].0 >= pairs[k].0 {
                continue; // not a boundary between distinct values
            }
            if k < min_leaf || pairs.len() - k < min_leaf {
                continue;
            }

            let left_n = k as f64;
            let right_n = n - left_n;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let left_sse = left_sq - left_sum * left_sum / left_n;
            let right_sse = right_sq - right_sum * right_sum / right_n;
            let gain = parent_sse - left_sse - right_sse;

            if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(BestSplit {
                    feature,
                    threshold: (pairs[k - 1].0 + pairs[k].0) / 2.0,
                    gain,
                });
            }
        }
    }
    best
}

// ── Ensemble ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Ensemble {
    base: f64,
    learning_rate: f64,
    n_features: usize,
    trees: Vec<Tree>,
    /// Accumulated split gain per feature, feeding attribution.
    gain: Vec<f64>,
}

impl Ensemble {
    fn raw_predict(&self, x: &Array2<f64>, i: usize) -> f64 {
        self.base
            + self.learning_rate
                * self
                    .trees
                    .iter()
                    .map(|t| t.predict_row(x, i))
                    .sum::<f64>()
    }

    fn importance(&self) -> Vec<f64> {
        let total: f64 = self.gain.iter().sum();
        if total > 0.0 {
            self.gain.iter().map(|g| g / total).collect()
        } else {
            vec![0.0; self.n_features]
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

enum Loss {
    Logistic,
    Squared,
}

fn fit_ensemble(x: &Array2<f64>, y: &[f64], params: &GbTreeParams, loss: Loss) -> Ensemble {
    let n = y.len();
    let rows: Vec<usize> = (0..n).collect();

    let base = match loss {
        Loss::Logistic => {
            let p = (y.iter().sum::<f64>() / n.max(1) as f64).clamp(1e-6, 1.0 - 1e-6);
            (p / (1.0 - p)).ln()
        }
        Loss::Squared => {
            if n == 0 {
                0.0
            } else {
                y.iter().sum::<f64>() / n as f64
            }
        }
    };

    let mut scores = vec![base; n];
    let mut trees = Vec::with_capacity(params.rounds);
    let mut gain = vec![0.0; x.ncols()];

    for _ in 0..params.rounds {
        let residuals: Vec<f64> = match loss {
            Loss::Logistic => y
                .iter()
                .zip(scores.iter())
                .map(|(&yi, &f)| yi - sigmoid(f))
                .collect(),
            Loss::Squared => y.iter().zip(scores.iter()).map(|(&yi, &f)| yi - f).collect(),
        };

        let tree = Tree::fit(x, &residuals, &rows, params.max_depth, params.min_leaf);
        for (i, score) in scores.iter_mut().enumerate() {
            *score += params.learning_rate * tree.predict_row(x, i);
        }
        tree.accumulate_gain(&mut gain);
        trees.push(tree);
    }

    debug!(
        rounds = params.rounds,
        features = x.ncols(),
        rows = n,
        "fitted boosted ensemble"
    );

    Ensemble {
        base,
        learning_rate: params.learning_rate,
        n_features: x.ncols(),
        trees,
        gain,
    }
}

// ── Public fronts ────────────────────────────────────────────────────────────

/// Binary classifier; `predict_proba` emits the positive-class probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbClassifier {
    ensemble: Ensemble,
}

impl GbClassifier {
    /// Fit on a feature matrix and 0/1 targets.
    pub fn fit(x: &Array2<f64>, y: &[f64], params: &GbTreeParams) -> Self {
        Self {
            ensemble: fit_ensemble(x, y, params, Loss::Logistic),
        }
    }

    /// Positive-class probability for every row, in [0, 1].
    pub fn predict_proba(&self, x: &Array2<f64>) -> Vec<f64> {
        (0..x.nrows())
            .map(|i| sigmoid(self.ensemble.raw_predict(x, i)))
            .collect()
    }

    /// Normalised total split gain per feature (sums to 1, or all zero if
    /// no tree ever split).
    pub fn feature_importance(&self) -> Vec<f64> {
        self.ensemble.importance()
    }

    pub fn n_features(&self) -> usize {
        self.ensemble.n_features
    }
}

/// Squared-loss regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbRegressor {
    ensemble: Ensemble,
}

impl GbRegressor {
    pub fn fit(x: &Array2<f64>, y: &[f64], params: &GbTreeParams) -> Self {
        Self {
            ensemble: fit_ensemble(x, y, params, Loss::Squared),
        }
    }

    pub fn predict(&self, x: &Array2<f64>) -> Vec<f64> {
        (0..x.nrows()).map(|i| self.ensemble.raw_predict(x, i)).collect()
    }

    pub fn feature_importance(&self) -> Vec<f64> {
        self.ensemble.importance()
    }

    pub fn n_features(&self) -> usize {
        self.ensemble.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn matrix(rows: &[Vec<f64>]) -> Array2<f64> {
        let d = rows[0].len();
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Array2::from_shape_vec((rows.len(), d), flat).unwrap()
    }

    #[test]
    fn classifier_separates_a_threshold_rule() {
        // y = 1 iff feature 0 > 0.5; feature 1 is noise-free constant
        let rows: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![i as f64 / 19.0, 1.0])
            .collect();
        let y: Vec<f64> = rows.iter().map(|r| f64::from(r[0] > 0.5)).collect();
        let x = matrix(&rows);

        let model = GbClassifier::fit(&x, &y, &GbTreeParams::classifier());
        let probs = model.predict_proba(&x);
        for (p, &yi) in probs.iter().zip(y.iter()) {
            assert!((0.0..=1.0).contains(p));
            if yi > 0.5 {
                assert!(*p > 0.5, "positive row scored {p}");
            } else {
                assert!(*p < 0.5, "negative row scored {p}");
            }
        }
    }

    #[test]
    fn classifier_importance_lands_on_the_informative_feature() {
        let rows: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![i as f64 / 19.0, 7.0])
            .collect();
        let y: Vec<f64> = rows.iter().map(|r| f64::from(r[0] > 0.5)).collect();
        let model = GbClassifier::fit(&matrix(&rows), &y, &GbTreeParams::classifier());

        let imp = model.feature_importance();
        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(imp[0] > 0.99); // the constant feature can never split
    }

    #[test]
    fn regressor_fits_a_linear_target_in_sample() {
        let rows: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = rows.iter().map(|r| 3.0 * r[0] + 1.0).collect();
        let x = matrix(&rows);

        let model = GbRegressor::fit(&x, &y, &GbTreeParams::regressor());
        let pred = model.predict(&x);
        let mae: f64 = pred
            .iter()
            .zip(y.iter())
            .map(|(p, t)| (p - t).abs())
            .sum::<f64>()
            / y.len() as f64;
        assert!(mae < 2.0, "in-sample MAE too high: {mae}");
    }

    #[test]
    fn fitting_is_deterministic() {
        let rows: Vec<Vec<f64>> = (0..16).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        let y: Vec<f64> = (0..16).map(|i| f64::from(i % 2 == 0)).collect();
        let x = matrix(&rows);

        let a = GbClassifier::fit(&x, &y, &GbTreeParams::classifier()).predict_proba(&x);
        let b = GbClassifier::fit(&x, &y, &GbTreeParams::classifier()).predict_proba(&x);
        assert_eq!(a, b);
    }
}
