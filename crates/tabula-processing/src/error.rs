//! Custom error types for the data preparation pipeline.
//!
//! Every failure is a typed outcome: the pipeline never partially mutates a
//! `Dataset` or `PreparedSet`, so callers can surface the error and retry
//! with different inputs. Errors are serializable as `{code, message}` so
//! they can cross a JSON/IPC boundary to a frontend.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for data preparation operations.
#[derive(Error, Debug)]
pub enum PrepError {
    /// Ingestion produced zero usable rows (every record was blank).
    #[error("No valid data found: every record is empty")]
    NoValidData,

    /// The caller supplied an empty feature list.
    #[error("No features selected")]
    NoFeaturesSelected,

    /// The completeness filter removed every row.
    #[error("No rows left after filtering for missing values")]
    EmptyAfterFiltering,

    /// Split ratio outside the legal range.
    #[error("Invalid split ratio {0} (must be within [0.0, 1.0])")]
    InvalidSplitRatio(f64),

    /// Histogram bin count must be positive.
    #[error("Invalid bin count {0} (must be at least 1)")]
    InvalidBinCount(usize),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper (CSV decoding collaborator).
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PrepError>,
    },
}

impl PrepError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PrepError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoValidData => "NO_VALID_DATA",
            Self::NoFeaturesSelected => "NO_FEATURES_SELECTED",
            Self::EmptyAfterFiltering => "EMPTY_AFTER_FILTERING",
            Self::InvalidSplitRatio(_) => "INVALID_SPLIT_RATIO",
            Self::InvalidBinCount(_) => "INVALID_BIN_COUNT",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is recoverable by changing the user's selection
    /// (as opposed to a broken input file or IO failure).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoFeaturesSelected
                | Self::EmptyAfterFiltering
                | Self::InvalidSplitRatio(_)
                | Self::InvalidBinCount(_)
                | Self::ColumnNotFound(_)
        )
    }
}

/// Serialize implementation for IPC compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields,
/// making them easy to handle in a frontend.
impl Serialize for PrepError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PrepError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for data preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PrepError::Polars(e).with_context(context))
    }
}
