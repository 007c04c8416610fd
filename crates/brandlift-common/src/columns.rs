//! Canonical column names for the tabular contracts.
//!
//! Every scorer consumes and produces named columns; the names are defined
//! once here so the crates never drift apart on spelling.

// ── Identity ─────────────────────────────────────────────────────────────────

pub const CREATOR_ID: &str = "creator_id";

// ── Creator match ────────────────────────────────────────────────────────────

pub const ENGAGEMENT_RATE: &str = "engagement_rate";
pub const AUDIENCE_OVERLAP: &str = "audience_overlap";
pub const GENRE_ALIGNMENT_SCORE: &str = "genre_alignment_score";
pub const FOLLOWER_COUNT: &str = "follower_count";
pub const MATCHED: &str = "matched";
pub const CREATOR_MATCH_SCORE: &str = "creator_match_score";

/// The four structured attributes the match model trains on, in the fixed
/// feature-vector order.
pub const MATCH_FEATURES: [&str; 4] = [
    ENGAGEMENT_RATE,
    AUDIENCE_OVERLAP,
    GENRE_ALIGNMENT_SCORE,
    FOLLOWER_COUNT,
];

// ── Virality ─────────────────────────────────────────────────────────────────

pub const CAPTION: &str = "caption";
pub const IS_VIRAL: &str = "is_viral";
pub const CAPTION_LENGTH: &str = "caption_length";
pub const HAS_HASHTAGS: &str = "has_hashtags";
pub const VIRALITY_SCORE: &str = "virality_score";

/// Name of the i-th caption-embedding column.
pub fn embedding_column(i: usize) -> String {
    format!("emb_{i}")
}

// ── Audience fit ─────────────────────────────────────────────────────────────

pub const FIT_SCORE: &str = "fit_score";

/// Age-bucket distribution columns (5 buckets).
pub const AGE_KEYS: [&str; 5] = [
    "age_13_17",
    "age_18_24",
    "age_25_34",
    "age_35_44",
    "age_45_plus",
];

/// Gender distribution columns.
pub const GENDER_KEYS: [&str; 2] = ["male_pct", "female_pct"];

/// Country distribution columns.
pub const COUNTRY_KEYS: [&str; 5] = ["US_pct", "MX_pct", "BR_pct", "IN_pct", "CA_pct"];

// ── ROI ──────────────────────────────────────────────────────────────────────

pub const CREATOR_COST: &str = "creator_cost";
pub const AUDIENCE_REACH: &str = "audience_reach";
pub const UGC_GENERATED: &str = "ugc_generated";
pub const CAMPAIGN_TYPE: &str = "campaign_type";
pub const REGION: &str = "region";
pub const CONTENT_TYPE: &str = "content_type";
pub const ROI: &str = "roi";
pub const PREDICTED_ROI: &str = "predicted_roi";
pub const ROI_RANK: &str = "roi_rank";

/// Every column the ROI optimizer requires on its input table.
pub const ROI_REQUIRED: [&str; 8] = [
    CREATOR_ID,
    CREATOR_COST,
    AUDIENCE_REACH,
    ENGAGEMENT_RATE,
    UGC_GENERATED,
    CAMPAIGN_TYPE,
    REGION,
    CONTENT_TYPE,
];

// ── Trend timing ─────────────────────────────────────────────────────────────

pub const TREND_DATE: &str = "date";
pub const TREND_USAGE: &str = "usage_count";

// ── Aggregation ──────────────────────────────────────────────────────────────

pub const RECOMMENDATION_SCORE: &str = "recommendation_score";

/// Name of the min-max-normalised companion of a score column.
pub fn normalised_column(name: &str) -> String {
    format!("{name}_norm")
}
