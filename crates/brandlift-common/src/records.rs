//! Typed domain records for the scoring pipeline.
//!
//! Most scorers operate on [`Frame`](crate::frame::Frame) tables directly;
//! these structs cover the edges where a typed shape matters — trend series
//! with a chronological invariant and demographic distributions with a
//! re-normalisation contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::{BrandliftError, Result};
use crate::frame::Frame;

// ---------------------------------------------------------------------------
// Creator / Post / Campaign
// ---------------------------------------------------------------------------

/// One creator row of the match-scoring table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorRecord {
    pub creator_id: String,
    pub engagement_rate: f64,
    pub audience_overlap: f64,
    pub genre_alignment_score: f64,
    pub follower_count: f64,
    /// Ground-truth match label; absent at pure scoring time.
    pub matched: Option<u8>,
}

/// One post row of the virality table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub creator_id: String,
    pub caption: String,
    /// Ground-truth virality label; when absent a weak label may be
    /// synthesised (see brandlift-features).
    pub is_viral: Option<u8>,
}

/// One historical campaign row of the ROI table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub creator_id: String,
    pub creator_cost: f64,
    pub audience_reach: f64,
    pub engagement_rate: f64,
    pub ugc_generated: f64,
    pub campaign_type: String,
    pub region: String,
    pub content_type: String,
}

// ---------------------------------------------------------------------------
// Trend series
// ---------------------------------------------------------------------------

/// A single (date, usage) observation of a trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub usage_count: f64,
}

/// Strictly chronological usage history for one trend (sound, hashtag, ...).
///
/// The chronological invariant is enforced at construction; minimum history
/// length is enforced by the forecaster, which knows how much data its
/// seasonal fit needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Build a series, rejecting out-of-order or duplicate dates.
    pub fn new(points: Vec<TrendPoint>) -> Result<Self> {
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(BrandliftError::UnorderedSeries { index: i + 1 });
            }
        }
        Ok(Self { points })
    }

    /// Load from a two-column delimited file (`date`, `usage_count`).
    /// The column names are the external contract; internally the series is
    /// just an ordered time/value pair.
    pub fn from_csv_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let frame = Frame::from_csv_path(path)?;
        Self::from_frame(&frame)
    }

    pub fn from_frame(frame: &Frame) -> Result<Self> {
        frame.require_columns("trend series", &[columns::TREND_DATE, columns::TREND_USAGE])?;
        let dates = frame.str_col(columns::TREND_DATE)?;
        let usage = frame.float(columns::TREND_USAGE)?;
        let mut points = Vec::with_capacity(dates.len());
        for (raw, &value) in dates.iter().zip(usage.iter()) {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                BrandliftError::Config(format!("unparseable date '{raw}': {e}"))
            })?;
            points.push(TrendPoint {
                date,
                usage_count: value,
            });
        }
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.usage_count).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }
}

// ---------------------------------------------------------------------------
// Demographics
// ---------------------------------------------------------------------------

/// A distribution across the three demographic partitions: age buckets,
/// gender, country.
///
/// Raw inputs are not required to be probabilities; [`normalised`]
/// re-scales each partition to sum to 1 before any comparison. A partition
/// summing to 0 maps to the all-zero vector, and its similarity against
/// anything is 0 by convention.
///
/// [`normalised`]: DemographicProfile::normalised
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicProfile {
    pub age: [f64; 5],
    pub gender: [f64; 2],
    pub country: [f64; 5],
}

impl DemographicProfile {
    /// Extract a profile from row `i` of a frame carrying the 12
    /// demographic columns.
    pub fn from_frame_row(frame: &Frame, i: usize) -> Result<Self> {
        let mut age = [0.0; 5];
        for (slot, key) in age.iter_mut().zip(columns::AGE_KEYS.iter()) {
            *slot = frame.float(key)?[i];
        }
        let mut gender = [0.0; 2];
        for (slot, key) in gender.iter_mut().zip(columns::GENDER_KEYS.iter()) {
            *slot = frame.float(key)?[i];
        }
        let mut country = [0.0; 5];
        for (slot, key) in country.iter_mut().zip(columns::COUNTRY_KEYS.iter()) {
            *slot = frame.float(key)?[i];
        }
        Ok(Self {
            age,
            gender,
            country,
        })
    }

    /// Re-normalise every partition to sum to 1 (zero-sum → all zeros).
    pub fn normalised(&self) -> Self {
        Self {
            age: normalise_partition(self.age),
            gender: normalise_partition(self.gender),
            country: normalise_partition(self.country),
        }
    }
}

fn normalise_partition<const N: usize>(raw: [f64; N]) -> [f64; N] {
    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        raw.map(|x| x / total)
    } else {
        [0.0; N]
    }
}
