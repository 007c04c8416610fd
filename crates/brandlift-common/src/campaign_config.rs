//! Campaign configuration for a scoring run.
//!
//! Callers can define a campaign via TOML or build the struct directly.
//! Every knob carries the default the scoring contracts assume, so an
//! empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BrandliftError, Result};

/// Complete configuration for one scoring run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Aggregation weights for the final recommendation score.
    #[serde(default)]
    pub weights: WeightsConfig,

    /// Shared model-training knobs.
    #[serde(default)]
    pub models: ModelConfig,

    /// Caption embedding options.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Trend-timing options.
    #[serde(default)]
    pub trend: TrendConfig,
}

impl CampaignConfig {
    /// Load a TOML configuration file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| BrandliftError::Config(e.to_string()))
    }
}

// ── Aggregation weights ──────────────────────────────────────────────────────

/// Relative weight of each component score in the final blend.
///
/// Applied exactly as given — no renormalisation to sum 1. The defaults sum
/// to 1.0 but the contract does not require callers to keep that property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_w_creator_match")]
    pub creator_match: f64,
    #[serde(default = "default_w_fit")]
    pub fit: f64,
    #[serde(default = "default_w_virality")]
    pub virality: f64,
    #[serde(default = "default_w_roi")]
    pub roi: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            creator_match: default_w_creator_match(),
            fit: default_w_fit(),
            virality: default_w_virality(),
            roi: default_w_roi(),
        }
    }
}

fn default_w_creator_match() -> f64 {
    0.3
}
fn default_w_fit() -> f64 {
    0.2
}
fn default_w_virality() -> f64 {
    0.3
}
fn default_w_roi() -> f64 {
    0.2
}

// ── Model training ───────────────────────────────────────────────────────────

/// Knobs shared by the trained scorers. The split fractions and round
/// counts are part of the scoring contracts; the seed makes every run
/// reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Held-out fraction for the creator-match model (stratified split).
    #[serde(default = "default_match_test_fraction")]
    pub match_test_fraction: f64,
    /// Held-out fraction for the virality and ROI models.
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    /// Boosting rounds for the binary classifiers.
    #[serde(default = "default_classifier_rounds")]
    pub classifier_rounds: usize,
    /// Boosting rounds for the ROI regressor.
    #[serde(default = "default_regressor_rounds")]
    pub regressor_rounds: usize,
    /// Tree depth for all boosted models (shallow trees).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            match_test_fraction: default_match_test_fraction(),
            test_fraction: default_test_fraction(),
            classifier_rounds: default_classifier_rounds(),
            regressor_rounds: default_regressor_rounds(),
            max_depth: default_max_depth(),
            learning_rate: default_learning_rate(),
        }
    }
}

fn default_seed() -> u64 {
    42
}
fn default_match_test_fraction() -> f64 {
    0.3
}
fn default_test_fraction() -> f64 {
    0.2
}
fn default_classifier_rounds() -> usize {
    50
}
fn default_regressor_rounds() -> usize {
    100
}
fn default_max_depth() -> usize {
    3
}
fn default_learning_rate() -> f64 {
    0.1
}

// ── Embedding ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Fixed dimension of the caption embedding.
    #[serde(default = "default_embedding_dim")]
    pub dim: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dim: default_embedding_dim(),
        }
    }
}

fn default_embedding_dim() -> usize {
    32
}

// ── Trend timing ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Periods projected beyond observed history.
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    /// Minimum observations before a seasonal fit is attempted.
    /// Two full weekly cycles — less than that and the day-of-week profile
    /// is unestimable.
    #[serde(default = "default_min_history")]
    pub min_history: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            min_history: default_min_history(),
        }
    }
}

fn default_horizon() -> usize {
    7
}
fn default_min_history() -> usize {
    14
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_standard_defaults() {
        let cfg: CampaignConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.weights.creator_match, 0.3);
        assert_eq!(cfg.weights.fit, 0.2);
        assert_eq!(cfg.weights.virality, 0.3);
        assert_eq!(cfg.weights.roi, 0.2);
        assert_eq!(cfg.models.seed, 42);
        assert_eq!(cfg.models.classifier_rounds, 50);
        assert_eq!(cfg.models.regressor_rounds, 100);
        assert_eq!(cfg.trend.horizon, 7);
        assert_eq!(cfg.trend.min_history, 14);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg: CampaignConfig = toml::from_str(
            "[weights]\ncreator_match = 0.5\n\n[embedding]\ndim = 16\n",
        )
        .unwrap();
        assert_eq!(cfg.weights.creator_match, 0.5);
        assert_eq!(cfg.weights.roi, 0.2);
        assert_eq!(cfg.embedding.dim, 16);
    }
}
