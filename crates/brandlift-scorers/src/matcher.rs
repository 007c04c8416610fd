//! Creator/brand match scorer.
//!
//! Binary classifier over four structured creator attributes. The fitted
//! scaler is part of the trained artifact: scoring applies the training-time
//! statistics unmodified, which is the invariant that keeps training and
//! serving on the same footing.

use serde::{Deserialize, Serialize};
use tracing::info;

use brandlift_common::campaign_config::ModelConfig;
use brandlift_common::{columns, BrandliftError, Frame, Result};
use brandlift_model::metrics::roc_auc;
use brandlift_model::split::stratified_split;
use brandlift_model::{GbClassifier, GbTreeParams, StandardScaler};

use crate::matrix::{feature_matrix, observed_classes, select_rows, select_values};

/// Training knobs for the match model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchParams {
    pub seed: u64,
    /// Held-out fraction of the stratified split.
    pub test_fraction: f64,
    pub tree: GbTreeParams,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.3,
            tree: GbTreeParams::classifier(),
        }
    }
}

impl MatchParams {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            seed: config.seed,
            test_fraction: config.match_test_fraction,
            tree: GbTreeParams {
                rounds: config.classifier_rounds,
                max_depth: config.max_depth,
                learning_rate: config.learning_rate,
                min_leaf: 2,
            },
        }
    }
}

/// Trained match artifact: the fitted scaler plus the classifier.
/// Never module state — the caller owns it and threads it into scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchModel {
    scaler: StandardScaler,
    classifier: GbClassifier,
}

fn match_feature_names() -> Vec<String> {
    columns::MATCH_FEATURES.iter().map(|s| s.to_string()).collect()
}

/// Train the match classifier and report held-out AUC.
///
/// Requires the four structured attributes plus the `matched` label; the
/// error names every missing column. The label must contain both classes.
pub fn train_match_model(frame: &Frame, params: &MatchParams) -> Result<(MatchModel, f64)> {
    let mut required: Vec<&str> = columns::MATCH_FEATURES.to_vec();
    required.push(columns::MATCHED);
    frame.require_columns("creator match training", &required)?;

    let labels = frame.float(columns::MATCHED)?.to_vec();
    let classes = observed_classes(&labels);
    if classes.len() < 2 {
        return Err(BrandliftError::DegenerateLabel {
            column: columns::MATCHED.to_string(),
            classes,
        });
    }

    let names = match_feature_names();
    let x = feature_matrix(frame, &names)?;
    let scaler = StandardScaler::fit(&x);
    let scaled = scaler.transform(&x);

    let int_labels: Vec<i64> = labels.iter().map(|&v| v.round() as i64).collect();
    let (train_rows, test_rows) = stratified_split(&int_labels, params.test_fraction, params.seed)?;

    let classifier = GbClassifier::fit(
        &select_rows(&scaled, &train_rows),
        &select_values(&labels, &train_rows),
        &params.tree,
    );

    let test_scores = classifier.predict_proba(&select_rows(&scaled, &test_rows));
    let auc = roc_auc(&select_values(&labels, &test_rows), &test_scores)?;

    info!(
        rows = frame.len(),
        train = train_rows.len(),
        test = test_rows.len(),
        auc,
        "trained creator match model"
    );

    Ok((MatchModel { scaler, classifier }, auc))
}

/// Score creators with a trained model, adding `creator_match_score`
/// (positive-class probability in [0, 1]) to a copy of the table.
///
/// The stored scaler is applied as-is — never refit on scoring data.
pub fn score_creators(frame: &Frame, model: &MatchModel) -> Result<Frame> {
    frame.require_columns("creator match scoring", &columns::MATCH_FEATURES)?;

    let names = match_feature_names();
    let x = feature_matrix(frame, &names)?;
    let scores = model.classifier.predict_proba(&model.scaler.transform(&x));

    let mut out = frame.clone();
    out.insert_float(columns::CREATOR_MATCH_SCORE, scores)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandlift_test_utils::creator_frame;

    #[test]
    fn missing_columns_are_all_named() {
        let mut frame = Frame::new();
        frame
            .insert_float(columns::ENGAGEMENT_RATE, vec![0.1, 0.2])
            .unwrap();
        let err = train_match_model(&frame, &MatchParams::default()).unwrap_err();
        match err {
            BrandliftError::MissingColumns { missing, .. } => {
                assert_eq!(
                    missing,
                    vec![
                        columns::AUDIENCE_OVERLAP.to_string(),
                        columns::GENRE_ALIGNMENT_SCORE.to_string(),
                        columns::FOLLOWER_COUNT.to_string(),
                        columns::MATCHED.to_string(),
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn single_class_label_reports_the_observed_class() {
        let frame = creator_frame(30, |_| 1.0);
        let err = train_match_model(&frame, &MatchParams::default()).unwrap_err();
        match err {
            BrandliftError::DegenerateLabel { column, classes } => {
                assert_eq!(column, columns::MATCHED);
                assert_eq!(classes, vec![1]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn train_then_score_adds_probability_column() {
        // label follows engagement rate, which the fixture makes informative
        let frame = creator_frame(40, |engagement| f64::from(engagement > 0.5));
        let (model, auc) = train_match_model(&frame, &MatchParams::default()).unwrap();
        assert!(auc > 0.9, "separable data should rank well, got {auc}");

        let scored = score_creators(&frame, &model).unwrap();
        let scores = scored.float(columns::CREATOR_MATCH_SCORE).unwrap();
        assert_eq!(scores.len(), 40);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        // input untouched
        assert!(!frame.has_column(columns::CREATOR_MATCH_SCORE));
    }

    #[test]
    fn scoring_reuses_training_statistics() {
        let frame = creator_frame(40, |engagement| f64::from(engagement > 0.5));
        let (model, _) = train_match_model(&frame, &MatchParams::default()).unwrap();

        // Scoring twice, and scoring a subset, must agree row-for-row:
        // the scaler is frozen, so scores depend only on the row itself.
        let full = score_creators(&frame, &model).unwrap();
        let again = score_creators(&frame, &model).unwrap();
        assert_eq!(
            full.float(columns::CREATOR_MATCH_SCORE).unwrap(),
            again.float(columns::CREATOR_MATCH_SCORE).unwrap()
        );
    }
}
