//! Content virality scorer.
//!
//! Caption text is turned into structured features plus a dense embedding,
//! labels come from a named label source (ground truth or keyword weak
//! labels), and a boosted classifier produces a continuous score for every
//! row. The returned per-row scores are in-sample — only the held-out AUC
//! is a generalisation estimate.

use serde::{Deserialize, Serialize};
use tracing::info;

use brandlift_common::campaign_config::ModelConfig;
use brandlift_common::{columns, BrandliftError, Frame, Result};
use brandlift_features::{engineer_caption_features, CaptionEmbedder, LabelProvenance, LabelSource};
use brandlift_model::metrics::roc_auc;
use brandlift_model::split::train_test_split;
use brandlift_model::{FeatureAttribution, GbClassifier, GbTreeParams};

use crate::matrix::{feature_matrix, observed_classes, select_rows, select_values};

/// Training knobs for the virality model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViralityParams {
    pub seed: u64,
    pub test_fraction: f64,
    pub tree: GbTreeParams,
}

impl Default for ViralityParams {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
            tree: GbTreeParams::classifier(),
        }
    }
}

impl ViralityParams {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            seed: config.seed,
            test_fraction: config.test_fraction,
            tree: GbTreeParams {
                rounds: config.classifier_rounds,
                max_depth: config.max_depth,
                learning_rate: config.learning_rate,
                min_leaf: 2,
            },
        }
    }
}

/// Everything the virality run produces.
#[derive(Debug, Clone)]
pub struct ViralityOutcome {
    /// Input copy plus caption features, embedding columns, and
    /// `virality_score` for every row (in-sample).
    pub frame: Frame,
    pub model: GbClassifier,
    /// Held-out AUC — the only generalisation estimate in here.
    pub auc: f64,
    /// Global importance over the training feature matrix; diagnostic only.
    pub attribution: FeatureAttribution,
    /// Whether labels were measured or synthesised.
    pub label_provenance: LabelProvenance,
}

/// Run the full virality pipeline over a caption table.
pub fn run_virality(
    frame: &Frame,
    embedder: &dyn CaptionEmbedder,
    source: &LabelSource,
    params: &ViralityParams,
) -> Result<ViralityOutcome> {
    let mut frame = engineer_caption_features(frame)?;

    let captions = frame.str_col(columns::CAPTION)?.to_vec();
    let vectors = embedder.embed(&captions);
    for j in 0..embedder.dim() {
        let column: Vec<f64> = vectors.iter().map(|v| v[j]).collect();
        frame.insert_float(&columns::embedding_column(j), column)?;
    }

    let (labels, label_provenance) = source.resolve(&frame)?;
    let classes = observed_classes(&labels);
    if classes.len() < 2 {
        return Err(BrandliftError::DegenerateLabel {
            column: columns::IS_VIRAL.to_string(),
            classes,
        });
    }

    // Feature vector: structured caption features then embedding dims.
    let mut names = vec![
        columns::CAPTION_LENGTH.to_string(),
        columns::HAS_HASHTAGS.to_string(),
    ];
    names.extend((0..embedder.dim()).map(columns::embedding_column));
    let x = feature_matrix(&frame, &names)?;

    let (train_rows, test_rows) = train_test_split(frame.len(), params.test_fraction, params.seed)?;
    let model = GbClassifier::fit(
        &select_rows(&x, &train_rows),
        &select_values(&labels, &train_rows),
        &params.tree,
    );

    let test_scores = model.predict_proba(&select_rows(&x, &test_rows));
    let auc = roc_auc(&select_values(&labels, &test_rows), &test_scores)?;

    // Every row is scored, training rows included.
    let scores = model.predict_proba(&x);
    frame.insert_float(columns::VIRALITY_SCORE, scores)?;

    let attribution = FeatureAttribution::from_split_gain(&names, &model.feature_importance());

    info!(
        rows = frame.len(),
        auc,
        provenance = ?label_provenance,
        "virality scoring complete"
    );

    Ok(ViralityOutcome {
        frame,
        model,
        auc,
        attribution,
        label_provenance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandlift_features::HashedNgramEmbedder;
    use brandlift_test_utils::caption_frame_mixed;

    #[test]
    fn weak_labels_train_and_score_every_row() {
        let frame = caption_frame_mixed(40);
        let embedder = HashedNgramEmbedder::new(16);
        let outcome = run_virality(
            &frame,
            &embedder,
            &LabelSource::KeywordHeuristic,
            &ViralityParams::default(),
        )
        .unwrap();

        assert_eq!(outcome.label_provenance, LabelProvenance::Heuristic);
        let scores = outcome.frame.float(columns::VIRALITY_SCORE).unwrap();
        assert_eq!(scores.len(), 40);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        // embeddings landed as columns
        assert!(outcome.frame.has_column(&columns::embedding_column(0)));
        assert!(outcome.frame.has_column(&columns::embedding_column(15)));
    }

    #[test]
    fn attribution_covers_the_training_features() {
        let frame = caption_frame_mixed(40);
        let embedder = HashedNgramEmbedder::new(8);
        let outcome = run_virality(
            &frame,
            &embedder,
            &LabelSource::KeywordHeuristic,
            &ViralityParams::default(),
        )
        .unwrap();

        // caption_length + has_hashtags + 8 embedding dims
        assert_eq!(outcome.attribution.features.len(), 10);
        let total: f64 = outcome
            .attribution
            .features
            .iter()
            .map(|f| f.importance)
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_captions_degenerate_to_an_error() {
        let mut frame = Frame::new();
        frame
            .insert_str(
                columns::CAPTION,
                (0..10).map(|i| format!("ordinary caption {i}")).collect(),
            )
            .unwrap();
        let embedder = HashedNgramEmbedder::new(8);
        let err = run_virality(
            &frame,
            &embedder,
            &LabelSource::KeywordHeuristic,
            &ViralityParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BrandliftError::DegenerateLabel { .. }));
    }
}
