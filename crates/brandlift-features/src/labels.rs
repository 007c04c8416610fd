//! Virality label sources.
//!
//! Ground-truth labels are used when the table carries them; otherwise a
//! keyword heuristic synthesises weak labels. The strategy is a named,
//! explicit choice so callers and tests can always tell a measured label
//! from a guessed one.

use serde::{Deserialize, Serialize};
use tracing::warn;

use brandlift_common::{columns, Frame, Result};

/// Keyword set for the weak-label heuristic, matched case-insensitively as
/// substrings. A hit marks the caption viral. This is weak supervision —
/// a labelling shortcut, not a measured outcome.
pub const VIRAL_KEYWORDS: [&str; 4] = ["viral", "trend", "must watch", "can't believe"];

/// Where a label vector came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelProvenance {
    /// Ground-truth `is_viral` column.
    Measured,
    /// Synthesised by the keyword heuristic.
    Heuristic,
}

/// Pluggable labelling strategy for the virality scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelSource {
    /// Require the `is_viral` column; fail if absent.
    GroundTruth,
    /// Always synthesise labels from [`VIRAL_KEYWORDS`].
    KeywordHeuristic,
}

impl LabelSource {
    /// The strategy the original pipeline applies implicitly: ground truth
    /// when the column exists, keyword fallback otherwise.
    pub fn for_frame(frame: &Frame) -> Self {
        if frame.has_column(columns::IS_VIRAL) {
            Self::GroundTruth
        } else {
            Self::KeywordHeuristic
        }
    }

    /// Produce one 0/1 label per row plus its provenance.
    pub fn resolve(&self, frame: &Frame) -> Result<(Vec<f64>, LabelProvenance)> {
        match self {
            Self::GroundTruth => {
                frame.require_columns("virality labels", &[columns::IS_VIRAL])?;
                Ok((
                    frame.float(columns::IS_VIRAL)?.to_vec(),
                    LabelProvenance::Measured,
                ))
            }
            Self::KeywordHeuristic => {
                frame.require_columns("virality labels", &[columns::CAPTION])?;
                let captions = frame.str_col(columns::CAPTION)?;
                let labels: Vec<f64> = captions
                    .iter()
                    .map(|c| {
                        let lower = c.to_lowercase();
                        f64::from(VIRAL_KEYWORDS.iter().any(|kw| lower.contains(kw)))
                    })
                    .collect();
                warn!(
                    rows = labels.len(),
                    positives = labels.iter().filter(|&&l| l > 0.5).count(),
                    "no ground-truth virality labels; synthesised keyword weak labels"
                );
                Ok((labels, LabelProvenance::Heuristic))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn caption_frame(captions: &[&str]) -> Frame {
        let mut f = Frame::new();
        f.insert_str(
            columns::CAPTION,
            captions.iter().map(|c| c.to_string()).collect(),
        )
        .unwrap();
        f
    }

    #[test]
    fn keyword_heuristic_is_case_insensitive_substring_match() {
        let frame = caption_frame(&[
            "This will go VIRAL",
            "new trending sound",
            "Must Watch before it's gone",
            "just a photo of my lunch",
        ]);
        let (labels, provenance) = LabelSource::KeywordHeuristic.resolve(&frame).unwrap();
        assert_eq!(labels, vec![1.0, 1.0, 1.0, 0.0]);
        assert_eq!(provenance, LabelProvenance::Heuristic);
    }

    #[test]
    fn ground_truth_requires_the_label_column() {
        let frame = caption_frame(&["anything"]);
        assert!(LabelSource::GroundTruth.resolve(&frame).is_err());
    }

    #[test]
    fn for_frame_prefers_measured_labels() {
        let mut frame = caption_frame(&["a", "b"]);
        assert_eq!(LabelSource::for_frame(&frame), LabelSource::KeywordHeuristic);
        frame.insert_float(columns::IS_VIRAL, vec![1.0, 0.0]).unwrap();
        assert_eq!(LabelSource::for_frame(&frame), LabelSource::GroundTruth);

        let (labels, provenance) = LabelSource::GroundTruth.resolve(&frame).unwrap();
        assert_eq!(labels, vec![1.0, 0.0]);
        assert_eq!(provenance, LabelProvenance::Measured);
    }
}
