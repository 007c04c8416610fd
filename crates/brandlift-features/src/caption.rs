//! Structured caption features.

use brandlift_common::{columns, Frame, Result};

/// Add `caption_length` (character count) and `has_hashtags` (0/1 on `#`
/// presence) to a copy of the table. The input frame is untouched.
pub fn engineer_caption_features(frame: &Frame) -> Result<Frame> {
    frame.require_columns("caption features", &[columns::CAPTION])?;
    let captions = frame.str_col(columns::CAPTION)?;

    let lengths: Vec<f64> = captions.iter().map(|c| c.chars().count() as f64).collect();
    let hashtags: Vec<f64> = captions
        .iter()
        .map(|c| f64::from(c.contains('#')))
        .collect();

    let mut out = frame.clone();
    out.insert_float(columns::CAPTION_LENGTH, lengths)?;
    out.insert_float(columns::HAS_HASHTAGS, hashtags)?;
    Ok(out)
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
    fn length_and_hashtag_flag() {
        let frame = caption_frame(&["go #viral now", "plain text"]);
        let out = engineer_caption_features(&frame).unwrap();
        assert_eq!(out.float(columns::CAPTION_LENGTH).unwrap(), &[13.0, 10.0]);
        assert_eq!(out.float(columns::HAS_HASHTAGS).unwrap(), &[1.0, 0.0]);
        // additive: original column still present
        assert!(out.has_column(columns::CAPTION));
        // copy-on-write: input untouched
        assert!(!frame.has_column(columns::CAPTION_LENGTH));
    }

    #[test]
    fn missing_caption_column_fails() {
        let frame = Frame::new();
        assert!(engineer_caption_features(&frame).is_err());
    }
}
