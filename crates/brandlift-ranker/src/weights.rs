//! Aggregation weight vector.

use serde::{Deserialize, Serialize};

use brandlift_common::campaign_config::WeightsConfig;
use brandlift_common::columns;

/// The four component weights of the final blend.
///
/// Weights are applied exactly as given — they are never renormalised to
/// sum to 1. Uniformly rescaling all weights therefore rescales
/// `recommendation_score` (rankings are unchanged, absolute values are
/// not). The defaults sum to 1.0 but the contract does not require it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightVector {
    pub creator_match: f64,
    pub fit: f64,
    pub virality: f64,
    pub roi: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            creator_match: 0.3,
            fit: 0.2,
            virality: 0.3,
            roi: 0.2,
        }
    }
}

impl WeightVector {
    pub fn from_config(config: &WeightsConfig) -> Self {
        Self {
            creator_match: config.creator_match,
            fit: config.fit,
            virality: config.virality,
            roi: config.roi,
        }
    }

    /// Score-column name and weight for each component.
    pub fn as_pairs(&self) -> [(&'static str, f64); 4] {
        [
            (columns::CREATOR_MATCH_SCORE, self.creator_match),
            (columns::FIT_SCORE, self.fit),
            (columns::VIRALITY_SCORE, self.virality),
            (columns::PREDICTED_ROI, self.roi),
        ]
    }

    /// Advisory check that the weights sum to ~1.0. Nothing enforces this;
    /// it exists so callers can warn on unusual configurations.
    pub fn sums_to_one(&self) -> bool {
        let sum = self.creator_match + self.fit + self.virality + self.roi;
        (sum - 1.0).abs() < 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!(WeightVector::default().sums_to_one());
    }

    #[test]
    fn pairs_map_to_score_columns() {
        let pairs = WeightVector::default().as_pairs();
        assert_eq!(pairs[0], (columns::CREATOR_MATCH_SCORE, 0.3));
        assert_eq!(pairs[3], (columns::PREDICTED_ROI, 0.2));
    }
}
