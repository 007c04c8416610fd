//! Standardisation (zero mean, unit variance) as an explicit trained artifact.
//!
//! The scaler is fit once on the training matrix and carried inside the
//! trained model; scoring applies the *same* statistics, never a refit.
//! Reusing training-time statistics is the invariant that avoids
//! train/serve skew.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Per-feature mean and standard deviation learned from a training matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    /// Learn per-column statistics from `x` (rows = samples).
    ///
    /// A zero-variance feature keeps a divisor of 1 so transformed values
    /// stay finite (centred at 0).
    pub fn fit(x: &Array2<f64>) -> Self {
        let n = x.nrows().max(1) as f64;
        let d = x.ncols();
        let mut mean = vec![0.0; d];
        let mut std = vec![0.0; d];

        for j in 0..d {
            let col = x.column(j);
            let m: f64 = col.iter().sum::<f64>() / n;
            let var: f64 = col.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n;
            mean[j] = m;
            let s = var.sqrt();
            std[j] = if s > 0.0 { s } else { 1.0 };
        }
        Self { mean, std }
    }

    /// Apply the stored statistics to a matrix with the same column layout.
    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut out = x.clone();
        for j in 0..out.ncols().min(self.mean.len()) {
            let (m, s) = (self.mean[j], self.std[j]);
            for v in out.column_mut(j) {
                *v = (*v - m) / s;
            }
        }
        out
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }
}
