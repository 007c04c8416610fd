//! brandlift-features — Caption feature engineering for the virality scorer.
//!
//! Structured caption features (length, hashtag flag), a deterministic
//! fixed-dimension caption embedding behind a trait seam, and the pluggable
//! label source that makes the weak-supervision fallback explicit.

pub mod caption;
pub mod embed;
pub mod labels;

pub use caption::engineer_caption_features;
pub use embed::{CaptionEmbedder, HashedNgramEmbedder, MockEmbedder};
pub use labels::{LabelProvenance, LabelSource, VIRAL_KEYWORDS};
