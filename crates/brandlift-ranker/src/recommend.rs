//! Final recommendation aggregation.

use tracing::{info, warn};

use brandlift_common::{columns, BrandliftError, Frame, Result, SortOrder};

use crate::normalise::min_max;
use crate::weights::WeightVector;

/// Blend the four component score columns into `recommendation_score`
/// using the standard weight vector, returning the table sorted
/// descending by the blended score.
pub fn combine_scores(frame: Frame, weights: &WeightVector) -> Result<Frame> {
    if !weights.sums_to_one() {
        warn!("aggregation weights do not sum to 1; scores scale accordingly");
    }
    combine_weighted(frame, &weights.as_pairs())
}

/// Generic weighted aggregation over arbitrary score columns.
///
/// Every weighted column is min-max normalised into a `{name}_norm`
/// companion column, then `recommendation_score = Σ weight·norm`. Weights
/// are used exactly as given. A weight key with no matching column is a
/// hard precondition failure naming the missing set — scores are never
/// silently defaulted.
pub fn combine_weighted(mut frame: Frame, weights: &[(&str, f64)]) -> Result<Frame> {
    let missing: Vec<String> = weights
        .iter()
        .filter(|(name, _)| !frame.has_column(name))
        .map(|(name, _)| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(BrandliftError::missing_columns("score aggregation", missing));
    }

    let mut blended = vec![0.0; frame.len()];
    for (name, weight) in weights {
        let normalised = min_max(frame.float(name)?);
        for (acc, v) in blended.iter_mut().zip(normalised.iter()) {
            *acc += weight * v;
        }
        frame.insert_float(&columns::normalised_column(name), normalised)?;
    }

    frame.insert_float(columns::RECOMMENDATION_SCORE, blended)?;
    frame.sort_by_float(columns::RECOMMENDATION_SCORE, SortOrder::Descending)?;

    info!(rows = frame.len(), components = weights.len(), "combined component scores");
    Ok(frame)
}
