//! brandlift-ranker — Final score aggregation and the single-shot pipeline.
//!
//! Normalises the heterogeneous component scores onto [0, 1] and blends
//! them with an auditable weighted sum into one ranked recommendation list.

pub mod weights;
pub mod normalise;
pub mod recommend;
pub mod pipeline;

pub use normalise::min_max;
pub use pipeline::{run_pipeline, PipelineReport};
pub use recommend::{combine_scores, combine_weighted};
pub use weights::WeightVector;
