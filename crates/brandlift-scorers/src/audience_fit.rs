//! Audience-demographic fit scorer.
//!
//! No training here: each creator's demographic distribution is compared
//! against the campaign target partition-by-partition with cosine
//! similarity, and the partitions are blended 0.4/0.3/0.3
//! (age/gender/country).

use tracing::info;

use brandlift_common::{columns, DemographicProfile, Frame, Result, SortOrder};

const AGE_WEIGHT: f64 = 0.4;
const GENDER_WEIGHT: f64 = 0.3;
const COUNTRY_WEIGHT: f64 = 0.3;

/// Cosine similarity, with the degenerate all-zero case defined as 0
/// rather than NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Score every creator row against the target demographic and return the
/// table sorted descending by `fit_score` (rounded to 4 decimals).
///
/// Takes the frame by value: this scorer owns its working copy and hands
/// it back augmented and sorted. Both creator and target partitions are
/// re-normalised before comparison, so raw percentages and probabilities
/// are both acceptable inputs.
pub fn demographic_fit(mut frame: Frame, target: &DemographicProfile) -> Result<Frame> {
    let required: Vec<&str> = columns::AGE_KEYS
        .iter()
        .chain(columns::GENDER_KEYS.iter())
        .chain(columns::COUNTRY_KEYS.iter())
        .copied()
        .collect();
    frame.require_columns("audience fit", &required)?;

    let target = target.normalised();
    let mut scores = Vec::with_capacity(frame.len());
    for i in 0..frame.len() {
        let creator = DemographicProfile::from_frame_row(&frame, i)?.normalised();
        let sim_age = cosine_similarity(&creator.age, &target.age);
        let sim_gender = cosine_similarity(&creator.gender, &target.gender);
        let sim_country = cosine_similarity(&creator.country, &target.country);
        let fit = AGE_WEIGHT * sim_age + GENDER_WEIGHT * sim_gender + COUNTRY_WEIGHT * sim_country;
        scores.push(round4(fit));
    }

    frame.insert_float(columns::FIT_SCORE, scores)?;
    frame.sort_by_float(columns::FIT_SCORE, SortOrder::Descending)?;

    info!(rows = frame.len(), "audience fit scored");
    Ok(frame)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandlift_test_utils::{demographic_frame, uniform_profile};
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_profile_scores_exactly_one() {
        let target = uniform_profile();
        // one creator whose raw distribution is a scaled copy of the target
        let scaled = DemographicProfile {
            age: target.age.map(|v| v * 7.0),
            gender: target.gender.map(|v| v * 3.0),
            country: target.country.map(|v| v * 11.0),
        };
        let frame = demographic_frame(&[scaled]);
        let out = demographic_fit(frame, &target).unwrap();
        assert_eq!(out.float(columns::FIT_SCORE).unwrap(), &[1.0]);
    }

    #[test]
    fn zero_partition_contributes_exactly_zero() {
        let target = uniform_profile();
        let mut creator = target.clone();
        creator.country = [0.0; 5];
        let frame = demographic_frame(&[creator]);
        let out = demographic_fit(frame, &target).unwrap();
        // age and gender partitions are identical → 0.4 + 0.3; country adds 0
        assert_eq!(out.float(columns::FIT_SCORE).unwrap(), &[0.7]);
    }

    #[test]
    fn output_is_sorted_descending_by_fit() {
        let target = uniform_profile();
        let close = target.clone();
        let mut far = target.clone();
        far.age = [1.0, 0.0, 0.0, 0.0, 0.0];
        far.gender = [1.0, 0.0];
        let frame = demographic_frame(&[far.clone(), close.clone(), far]);
        let out = demographic_fit(frame, &target).unwrap();
        let scores = out.float(columns::FIT_SCORE).unwrap();
        assert!(scores[0] >= scores[1] && scores[1] >= scores[2]);
        assert_eq!(scores[0], 1.0);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero_not_nan() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.5, 0.5]), 0.0);
    }
}
