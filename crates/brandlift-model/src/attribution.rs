//! Global feature-attribution diagnostic.
//!
//! A trained ensemble reports how much each feature contributed to its
//! fit, computed over the same feature matrix used for training. This is
//! a diagnostic artifact for the presentation layer — it never feeds back
//! into any score.

use serde::{Deserialize, Serialize};

/// Importance of a single named feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub name: String,
    pub importance: f64,
}

/// Ranked global importance summary for a trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureAttribution {
    /// How the importances were computed (currently `"split_gain"`).
    pub method: String,
    /// Features sorted by descending importance.
    pub features: Vec<FeatureImportance>,
}

impl FeatureAttribution {
    /// Pair feature names with importances and sort descending.
    pub fn from_split_gain(names: &[String], importances: &[f64]) -> Self {
        let mut features: Vec<FeatureImportance> = names
            .iter()
            .zip(importances.iter())
            .map(|(name, &importance)| FeatureImportance {
                name: name.clone(),
                importance,
            })
            .collect();
        features.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self {
            method: "split_gain".to_string(),
            features,
        }
    }

    /// The `n` most important features.
    pub fn top(&self, n: usize) -> &[FeatureImportance] {
        &self.features[..n.min(self.features.len())]
    }

    /// JSON rendering for the presentation layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
