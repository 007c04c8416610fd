//! Test the end-to-end scoring pipeline over synthetic campaign data.
//!
//! Run with:
//! ```bash
//! cargo test --package brandlift-ranker --test test_pipeline_e2e -- --nocapture
//! ```

use brandlift_common::{columns, CampaignConfig, DemographicProfile, Frame};
use brandlift_features::LabelProvenance;
use brandlift_ranker::run_pipeline;
use brandlift_test_utils::{campaign_frame, caption_frame_mixed, creator_frame, uniform_profile};

const N_CREATORS: usize = 40;

/// Creator table carrying both the match attributes and the twelve
/// demographic columns. Even-indexed creators skew young, odd-indexed
/// skew older, so fit scores against a uniform target vary.
fn full_creator_frame() -> Frame {
    let mut frame = creator_frame(N_CREATORS, |e| f64::from(e > 0.5));

    let profiles: Vec<DemographicProfile> = (0..N_CREATORS)
        .map(|i| {
            if i % 2 == 0 {
                DemographicProfile {
                    age: [0.4, 0.3, 0.2, 0.1, 0.0],
                    gender: [0.4, 0.6],
                    country: [0.5, 0.2, 0.1, 0.1, 0.1],
                }
            } else {
                DemographicProfile {
                    age: [0.0, 0.1, 0.2, 0.3, 0.4],
                    gender: [0.6, 0.4],
                    country: [0.1, 0.1, 0.1, 0.2, 0.5],
                }
            }
        })
        .collect();

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

#[test]
fn test_pipeline_ranks_every_creator() {
    let _ = tracing_subscriber::fmt::try_init();

    let creators = full_creator_frame();
    let posts = caption_frame_mixed(N_CREATORS);
    let campaigns = campaign_frame(N_CREATORS);
    let config = CampaignConfig::default();

    let report = run_pipeline(&creators, &posts, &campaigns, &uniform_profile(), &config)
        .expect("pipeline run");

    // Every creator appears in all three tables, so the inner join keeps
    // all of them.
    assert_eq!(report.ranked.len(), N_CREATORS);

    // Final table carries the four component scores, their normalised
    // companions, and the blended score.
    for name in [
        columns::CREATOR_MATCH_SCORE,
        columns::FIT_SCORE,
        columns::VIRALITY_SCORE,
        columns::PREDICTED_ROI,
        columns::RECOMMENDATION_SCORE,
    ] {
        assert!(report.ranked.has_column(name), "missing column {name}");
    }
    for name in [
        columns::CREATOR_MATCH_SCORE,
        columns::FIT_SCORE,
        columns::VIRALITY_SCORE,
        columns::PREDICTED_ROI,
    ] {
        let norm = report
            .ranked
            .float(&columns::normalised_column(name))
            .expect("normalised column");
        assert!(norm.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    // Sorted descending by the blended score; default weights sum to 1,
    // so blended scores stay inside [0, 1].
    let scores = report.ranked.float(columns::RECOMMENDATION_SCORE).unwrap();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));

    // Diagnostics are populated and sane.
    assert!((0.0..=1.0).contains(&report.match_auc));
    assert!((0.0..=1.0).contains(&report.virality_auc));
    assert!(report.roi_mae >= 0.0 && report.roi_mae.is_finite());
    assert!(!report.attribution.features.is_empty());

    // The caption table has no ground-truth labels, so the keyword
    // heuristic kicks in.
    assert_eq!(report.label_provenance, LabelProvenance::Heuristic);
}

#[test]
fn test_pipeline_is_deterministic() {
    let creators = full_creator_frame();
    let posts = caption_frame_mixed(N_CREATORS);
    let campaigns = campaign_frame(N_CREATORS);
    let config = CampaignConfig::default();

    let a = run_pipeline(&creators, &posts, &campaigns, &uniform_profile(), &config).unwrap();
    let b = run_pipeline(&creators, &posts, &campaigns, &uniform_profile(), &config).unwrap();

    assert_eq!(
        a.ranked.str_col(columns::CREATOR_ID).unwrap(),
        b.ranked.str_col(columns::CREATOR_ID).unwrap()
    );
    assert_eq!(
        a.ranked.float(columns::RECOMMENDATION_SCORE).unwrap(),
        b.ranked.float(columns::RECOMMENDATION_SCORE).unwrap()
    );
    assert_eq!(a.match_auc, b.match_auc);
    assert_eq!(a.roi_mae, b.roi_mae);
}

#[test]
fn test_pipeline_drops_creators_missing_from_a_component() {
    let creators = full_creator_frame();
    let posts = caption_frame_mixed(N_CREATORS);
    // Campaign history only for the first half of the creators.
    let campaigns = campaign_frame(N_CREATORS / 2);
    let config = CampaignConfig::default();

    let report = run_pipeline(&creators, &posts, &campaigns, &uniform_profile(), &config)
        .expect("pipeline run");

    // Creators without a predicted ROI never reach the final table.
    assert_eq!(report.ranked.len(), N_CREATORS / 2);
    let ids = report.ranked.str_col(columns::CREATOR_ID).unwrap();
    assert!(ids.iter().all(|id| {
        let idx: usize = id.trim_start_matches("creator_").parse().unwrap();
        idx < N_CREATORS / 2
    }));
}
