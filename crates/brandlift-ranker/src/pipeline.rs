//! Single-shot batch pipeline: all five scorers plus aggregation.
//!
//! Thin orchestration for callers that hold the three input tables and a
//! campaign target. Each stage is the same public entry point a caller
//! could invoke directly; the pipeline only threads artifacts and joins
//! the per-creator scores before the final blend.

use std::collections::HashMap;

use tracing::info;

use brandlift_common::{columns, BrandliftError, CampaignConfig, DemographicProfile, Frame, Result};
use brandlift_features::{HashedNgramEmbedder, LabelProvenance, LabelSource};
use brandlift_model::FeatureAttribution;
use brandlift_scorers::{
    demographic_fit, optimize_roi, run_virality, score_creators, train_match_model, MatchParams,
    RoiParams, ViralityParams,
};

use crate::recommend::combine_scores;
use crate::weights::WeightVector;

/// Everything a full pipeline run reports back.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Final table: one row per creator, four component scores, their
    /// normalised companions, and `recommendation_score`, sorted
    /// descending.
    pub ranked: Frame,
    /// Held-out AUC of the creator-match model.
    pub match_auc: f64,
    /// Held-out AUC of the virality model.
    pub virality_auc: f64,
    /// Held-out MAE of the ROI regressor.
    pub roi_mae: f64,
    /// Virality feature-attribution diagnostic.
    pub attribution: FeatureAttribution,
    /// Whether virality labels were measured or synthesised.
    pub label_provenance: LabelProvenance,
}

/// Run match, virality, audience-fit, and ROI scoring, join the results
/// per creator, and blend them into the final ranking.
///
/// `creators` carries the four match attributes, the `matched` label, and
/// the twelve demographic columns. `posts` carries captions (one or more
/// per creator; virality is averaged per creator before the join).
/// `campaigns` carries the eight ROI columns. Creators missing from any
/// component are dropped from the final table — a partial score bundle is
/// never aggregated.
pub fn run_pipeline(
    creators: &Frame,
    posts: &Frame,
    campaigns: &Frame,
    target: &DemographicProfile,
    config: &CampaignConfig,
) -> Result<PipelineReport> {
    let (match_model, match_auc) =
        train_match_model(creators, &MatchParams::from_config(&config.models))?;
    let match_frame = score_creators(creators, &match_model)?;

    let embedder = HashedNgramEmbedder::new(config.embedding.dim);
    let label_source = LabelSource::for_frame(posts);
    let virality = run_virality(
        posts,
        &embedder,
        &label_source,
        &ViralityParams::from_config(&config.models),
    )?;

    let fit_frame = demographic_fit(creators.clone(), target)?;
    let roi = optimize_roi(campaigns, &RoiParams::from_config(&config.models))?;

    let match_scores = score_by_creator(&match_frame, columns::CREATOR_MATCH_SCORE)?;
    let fit_scores = score_by_creator(&fit_frame, columns::FIT_SCORE)?;
    let virality_scores = mean_score_by_creator(&virality.frame, columns::VIRALITY_SCORE)?;
    let roi_scores = score_by_creator(&roi.frame, columns::PREDICTED_ROI)?;

    // Inner join on creator_id, creator-table order.
    let mut ids = Vec::new();
    let mut match_col = Vec::new();
    let mut fit_col = Vec::new();
    let mut virality_col = Vec::new();
    let mut roi_col = Vec::new();
    for id in creators.str_col(columns::CREATOR_ID)? {
        let (Some(&m), Some(&f), Some(&v), Some(&r)) = (
            match_scores.get(id),
            fit_scores.get(id),
            virality_scores.get(id),
            roi_scores.get(id),
        ) else {
            continue;
        };
        ids.push(id.clone());
        match_col.push(m);
        fit_col.push(f);
        virality_col.push(v);
        roi_col.push(r);
    }
    if ids.is_empty() {
        return Err(BrandliftError::EmptyTable {
            context: "pipeline join".to_string(),
        });
    }

    let mut scores = Frame::new();
    scores.insert_str(columns::CREATOR_ID, ids)?;
    scores.insert_float(columns::CREATOR_MATCH_SCORE, match_col)?;
    scores.insert_float(columns::FIT_SCORE, fit_col)?;
    scores.insert_float(columns::VIRALITY_SCORE, virality_col)?;
    scores.insert_float(columns::PREDICTED_ROI, roi_col)?;

    let ranked = combine_scores(scores, &WeightVector::from_config(&config.weights))?;

    info!(
        creators = ranked.len(),
        match_auc,
        virality_auc = virality.auc,
        roi_mae = roi.mae,
        "pipeline complete"
    );

    Ok(PipelineReport {
        ranked,
        match_auc,
        virality_auc: virality.auc,
        roi_mae: roi.mae,
        attribution: virality.attribution,
        label_provenance: virality.label_provenance,
    })
}

fn score_by_creator(frame: &Frame, score: &str) -> Result<HashMap<String, f64>> {
    let ids = frame.str_col(columns::CREATOR_ID)?;
    let values = frame.float(score)?;
    Ok(ids.iter().cloned().zip(values.iter().copied()).collect())
}

fn mean_score_by_creator(frame: &Frame, score: &str) -> Result<HashMap<String, f64>> {
    let ids = frame.str_col(columns::CREATOR_ID)?;
    let values = frame.float(score)?;
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    for (id, &v) in ids.iter().zip(values.iter()) {
        let entry = sums.entry(id.clone()).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }
    Ok(sums
        .into_iter()
        .map(|(id, (sum, count))| (id, sum / count as f64))
        .collect())
}
