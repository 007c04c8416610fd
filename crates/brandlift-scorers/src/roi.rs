//! ROI optimizer.
//!
//! Derives a return-on-investment target from historical campaign rows,
//! fits a boosted regressor over numeric and one-hot-encoded categorical
//! features, and ranks creators by predicted ROI. Per-row predictions are
//! in-sample; only the held-out MAE estimates generalisation.

use serde::{Deserialize, Serialize};
use tracing::info;

use brandlift_common::campaign_config::ModelConfig;
use brandlift_common::{columns, Frame, Result, SortOrder};
use brandlift_model::metrics::mean_absolute_error;
use brandlift_model::split::train_test_split;
use brandlift_model::{GbRegressor, GbTreeParams};

use crate::matrix::{feature_matrix, select_rows, select_values};

/// Training knobs for the ROI regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiParams {
    pub seed: u64,
    pub test_fraction: f64,
    pub tree: GbTreeParams,
}

impl Default for RoiParams {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
            tree: GbTreeParams::regressor(),
        }
    }
}

impl RoiParams {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            seed: config.seed,
            test_fraction: config.test_fraction,
            tree: GbTreeParams {
                rounds: config.regressor_rounds,
                max_depth: config.max_depth,
                learning_rate: config.learning_rate,
                min_leaf: 2,
            },
        }
    }
}

/// ROI run output: ranked table, trained model, held-out MAE.
#[derive(Debug, Clone)]
pub struct RoiOutcome {
    /// Input copy plus `roi`, `predicted_roi`, `roi_rank`, sorted
    /// ascending by rank (rank 1 = highest predicted ROI).
    pub frame: Frame,
    pub model: GbRegressor,
    pub mae: f64,
}

/// Train the ROI model and rank every row by predicted ROI.
pub fn optimize_roi(frame: &Frame, params: &RoiParams) -> Result<RoiOutcome> {
    frame.require_columns("roi optimization", &columns::ROI_REQUIRED)?;

    let cost = frame.float(columns::CREATOR_COST)?;
    let ugc = frame.float(columns::UGC_GENERATED)?;
    // Zero (or sub-unit) cost is floored to 1 so the target stays finite.
    let roi: Vec<f64> = ugc
        .iter()
        .zip(cost.iter())
        .map(|(&u, &c)| u / c.max(1.0))
        .collect();

    let mut out = frame.clone();
    out.insert_float(columns::ROI, roi.clone())?;

    // Numeric features first, then one-hot categoricals with the first
    // (sorted) category dropped per field to dodge the dummy-variable trap.
    let mut names: Vec<String> = vec![
        columns::AUDIENCE_REACH.to_string(),
        columns::ENGAGEMENT_RATE.to_string(),
        columns::CREATOR_COST.to_string(),
    ];
    for field in [columns::CAMPAIGN_TYPE, columns::REGION, columns::CONTENT_TYPE] {
        names.extend(one_hot_drop_first(&mut out, field)?);
    }
    let x = feature_matrix(&out, &names)?;

    let (train_rows, test_rows) = train_test_split(out.len(), params.test_fraction, params.seed)?;
    let model = GbRegressor::fit(
        &select_rows(&x, &train_rows),
        &select_values(&roi, &train_rows),
        &params.tree,
    );

    let test_pred = model.predict(&select_rows(&x, &test_rows));
    let mae = mean_absolute_error(&select_values(&roi, &test_rows), &test_pred)?;

    // Every row gets a prediction, training rows included.
    let predicted = model.predict(&x);
    let ranks = dense_rank_descending(&predicted);
    out.insert_float(columns::PREDICTED_ROI, predicted)?;
    out.insert_float(columns::ROI_RANK, ranks)?;
    out.sort_by_float(columns::ROI_RANK, SortOrder::Ascending)?;

    info!(rows = out.len(), mae, "roi optimization complete");

    Ok(RoiOutcome { frame: out, model, mae })
}

/// One-hot encode a categorical column in place, returning the generated
/// column names. The lexicographically first category is the dropped
/// reference level.
fn one_hot_drop_first(frame: &mut Frame, field: &str) -> Result<Vec<String>> {
    let values = frame.str_col(field)?.to_vec();
    let mut categories: Vec<String> = values.clone();
    categories.sort();
    categories.dedup();

    let mut names = Vec::new();
    for category in categories.iter().skip(1) {
        let name = format!("{field}_{category}");
        let column: Vec<f64> = values.iter().map(|v| f64::from(v == category)).collect();
        frame.insert_float(&name, column)?;
        names.push(name);
    }
    Ok(names)
}

/// Dense descending rank: highest value gets 1, ties share a rank, the
/// next distinct value takes the following integer.
fn dense_rank_descending(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; values.len()];
    let mut rank = 0u64;
    let mut previous = f64::INFINITY;
    for &i in &order {
        if (values[i] - previous).abs() > 1e-12 {
            rank += 1;
            previous = values[i];
        }
        ranks[i] = rank as f64;
    }
    ranks
}
