//! brandlift-scorers — The five scoring components of the creator pipeline.
//!
//! Each scorer consumes a tabular dataset and returns an augmented copy
//! with its score column(s); trained models are explicit artifacts the
//! caller threads into scoring. Blending the scores into one ranked list
//! is brandlift-ranker's job.

pub mod matcher;
pub mod virality;
pub mod audience_fit;
pub mod trend_timing;
pub mod roi;

pub(crate) mod matrix;

pub use audience_fit::demographic_fit;
pub use matcher::{score_creators, train_match_model, MatchModel, MatchParams};
pub use roi::{optimize_roi, RoiOutcome, RoiParams};
pub use trend_timing::{forecast_trend, ActivationWindow, TrendForecast, TrendParams};
pub use virality::{run_virality, ViralityOutcome, ViralityParams};
