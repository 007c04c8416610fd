//! brandlift-model — Training plumbing shared by the trained scorers.
//!
//! Deterministic train/test splitting, the standard-scaler artifact,
//! gradient-boosted shallow trees (classifier and regressor), evaluation
//! metrics, and the global feature-attribution diagnostic.

pub mod split;
pub mod scaler;
pub mod gbtree;
pub mod metrics;
pub mod attribution;

pub use attribution::FeatureAttribution;
pub use gbtree::{GbClassifier, GbRegressor, GbTreeParams};
pub use scaler::StandardScaler;
