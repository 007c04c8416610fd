//! brandlift-test-utils — Shared fixture builders for workspace tests.
//!
//! Everything here is deterministic: fixed seeds, fixed start dates, fixed
//! caption rotations, so assertions over trained models stay stable.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use brandlift_common::{columns, DemographicProfile, Frame, TrendPoint, TrendSeries};

/// Creator table with the four match attributes plus a `matched` label
/// derived from the engagement rate by `label`.
///
/// Engagement rates sweep 0..1 and the other attributes co-vary with
/// them, so a rule like `|e| f64::from(e > 0.5)` is learnable.
pub fn creator_frame(n: usize, label: impl Fn(f64) -> f64) -> Frame {
    let mut frame = Frame::new();
    let ids: Vec<String> = (0..n).map(|i| format!("creator_{i}")).collect();
    let engagement: Vec<f64> = (0..n).map(|i| i as f64 / (n.max(2) - 1) as f64).collect();
    let overlap: Vec<f64> = engagement.iter().map(|e| 0.2 + 0.6 * e).collect();
    let genre: Vec<f64> = engagement.iter().map(|e| 1.0 - 0.5 * e).collect();
    let followers: Vec<f64> = (0..n).map(|i| 1_000.0 + 500.0 * i as f64).collect();
    let matched: Vec<f64> = engagement.iter().map(|&e| label(e)).collect();

    frame.insert_str(columns::CREATOR_ID, ids).unwrap();
    frame.insert_float(columns::ENGAGEMENT_RATE, engagement).unwrap();
    frame.insert_float(columns::AUDIENCE_OVERLAP, overlap).unwrap();
    frame.insert_float(columns::GENRE_ALIGNMENT_SCORE, genre).unwrap();
    frame.insert_float(columns::FOLLOWER_COUNT, followers).unwrap();
    frame.insert_float(columns::MATCHED, matched).unwrap();
    frame
}

const VIRAL_CAPTIONS: [&str; 4] = [
    "This new sound is going viral fast #fyp",
    "You won't believe this trend taking over",
    "Must watch before the weekend ends",
    "Can't believe how fast this blew up #viral",
];

const PLAIN_CAPTIONS: [&str; 4] = [
    "Sunday meal prep with the family",
    "A quiet walk around the lake",
    "New desk setup finally finished",
    "Trying the recipe my grandmother sent",
];

/// Caption table alternating keyword-positive and plain captions, so the
/// keyword heuristic yields a balanced label column.
pub fn caption_frame_mixed(n: usize) -> Frame {
    let mut frame = Frame::new();
    let ids: Vec<String> = (0..n).map(|i| format!("creator_{i}")).collect();
    let captions: Vec<String> = (0..n)
        .map(|i| {
            if i % 2 == 0 {
                format!("{} ({i})", VIRAL_CAPTIONS[(i / 2) % VIRAL_CAPTIONS.len()])
            } else {
                format!("{} ({i})", PLAIN_CAPTIONS[(i / 2) % PLAIN_CAPTIONS.len()])
            }
        })
        .collect();
    frame.insert_str(columns::CREATOR_ID, ids).unwrap();
    frame.insert_str(columns::CAPTION, captions).unwrap();
    frame
}

/// Uniform demographic target: every bucket equally likely.
pub fn uniform_profile() -> DemographicProfile {
    DemographicProfile {
        age: [0.2; 5],
        gender: [0.5; 2],
        country: [0.2; 5],
    }
}

/// Demographic table with one row per profile.
pub fn demographic_frame(profiles: &[DemographicProfile]) -> Frame {
    let mut frame = Frame::new();
    let ids: Vec<String> = (0..profiles.len()).map(|i| format!("creator_{i}")).collect();
    frame.insert_str(columns::CREATOR_ID, ids).unwrap();

    for (j, key) in columns::AGE_KEYS.iter().enumerate() {
        let column: Vec<f64> = profiles.iter().map(|p| p.age[j]).collect();
        frame.insert_float(key, column).unwrap();
    }
    for (j, key) in columns::GENDER_KEYS.iter().enumerate() {
        let column: Vec<f64> = profiles.iter().map(|p| p.gender[j]).collect();
        frame.insert_float(key, column).unwrap();
    }
    for (j, key) in columns::COUNTRY_KEYS.iter().enumerate() {
        let column: Vec<f64> = profiles.iter().map(|p| p.country[j]).collect();
        frame.insert_float(key, column).unwrap();
    }
    frame
}

/// Historical campaign table with all eight ROI columns. Costs and reach
/// come from a fixed-seed generator; categoricals cycle through small
/// vocabularies so one-hot encoding always has multiple levels.
pub fn campaign_frame(n: usize) -> Frame {
    let mut rng = StdRng::seed_from_u64(7);
    let mut frame = Frame::new();

    let ids: Vec<String> = (0..n).map(|i| format!("creator_{i}")).collect();
    let cost: Vec<f64> = (0..n).map(|_| rng.gen_range(50.0..5_000.0)).collect();
    let reach: Vec<f64> = (0..n).map(|_| rng.gen_range(10_000.0..1_000_000.0)).collect();
    let engagement: Vec<f64> = (0..n).map(|_| rng.gen_range(0.01..0.2)).collect();
    let ugc: Vec<f64> = cost
        .iter()
        .zip(engagement.iter())
        .map(|(c, e)| (c * e * 0.5).round())
        .collect();

    let campaign_types = ["awareness", "launch", "seasonal"];
    let regions = ["US", "MX", "BR"];
    let content_types = ["video", "image", "story"];

    frame.insert_str(columns::CREATOR_ID, ids).unwrap();
    frame.insert_float(columns::CREATOR_COST, cost).unwrap();
    frame.insert_float(columns::AUDIENCE_REACH, reach).unwrap();
    frame.insert_float(columns::ENGAGEMENT_RATE, engagement).unwrap();
    frame.insert_float(columns::UGC_GENERATED, ugc).unwrap();
    frame
        .insert_str(
            columns::CAMPAIGN_TYPE,
            (0..n).map(|i| campaign_types[i % 3].to_string()).collect(),
        )
        .unwrap();
    frame
        .insert_str(
            columns::REGION,
            (0..n).map(|i| regions[(i / 3) % 3].to_string()).collect(),
        )
        .unwrap();
    frame
        .insert_str(
            columns::CONTENT_TYPE,
            (0..n).map(|i| content_types[(i / 9) % 3].to_string()).collect(),
        )
        .unwrap();
    frame
}

/// Daily trend series starting on Monday 2025-06-02, `usage_count`
/// generated by `value` from the day index.
pub fn trend_series(n: usize, value: impl Fn(usize) -> f64) -> TrendSeries {
    let start = NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date");
    let points: Vec<TrendPoint> = (0..n)
        .map(|t| TrendPoint {
            date: start + chrono::Duration::days(t as i64),
            usage_count: value(t),
        })
        .collect();
    TrendSeries::new(points).expect("consecutive dates are chronological")
}

/// Score table for aggregation tests: one row per creator with all four
/// component score columns.
pub fn score_frame(rows: &[(&str, f64, f64, f64, f64)]) -> Frame {
    let mut frame = Frame::new();
    frame
        .insert_str(
            columns::CREATOR_ID,
            rows.iter().map(|r| r.0.to_string()).collect(),
        )
        .unwrap();
    frame
        .insert_float(columns::CREATOR_MATCH_SCORE, rows.iter().map(|r| r.1).collect())
        .unwrap();
    frame
        .insert_float(columns::FIT_SCORE, rows.iter().map(|r| r.2).collect())
        .unwrap();
    frame
        .insert_float(columns::VIRALITY_SCORE, rows.iter().map(|r| r.3).collect())
        .unwrap();
    frame
        .insert_float(columns::PREDICTED_ROI, rows.iter().map(|r| r.4).collect())
        .unwrap();
    frame
}
