use thiserror::Error;

/// Workspace-wide error type.
///
/// Schema and label violations fail fast and are never caught inside the
/// core; the presentation layer owns turning them into user-facing messages.
/// Numeric degeneracies (zero-sum partitions, zero cost, constant columns)
/// are deliberately *not* represented here — those substitute documented
/// fallback values instead of failing.
#[derive(Debug, Error)]
pub enum BrandliftError {
    #[error("{context}: missing required column(s): {missing:?}")]
    MissingColumns {
        context: String,
        missing: Vec<String>,
    },

    #[error("label column '{column}' must contain both classes, found only {classes:?}")]
    DegenerateLabel { column: String, classes: Vec<i64> },

    #[error("insufficient trend history: need at least {required} observations, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("trend series must be strictly chronological (violation at index {index})")]
    UnorderedSeries { index: usize },

    #[error("{context}: table has no rows")]
    EmptyTable { context: String },

    #[error("column '{column}' is not numeric")]
    NonNumericColumn { column: String },

    #[error("column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BrandliftError>;

impl BrandliftError {
    /// Build a schema-violation error naming every missing column at once.
    pub fn missing_columns(context: &str, missing: Vec<String>) -> Self {
        Self::MissingColumns {
            context: context.to_string(),
            missing,
        }
    }
}
