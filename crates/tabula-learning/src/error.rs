//! Error types for the mock training layer.
//!
//! All public API functions return `Result<T, LearningError>`. Data
//! preparation failures from the processing crate pass through unchanged
//! via the [`Prep`](LearningError::Prep) variant.

use serde::Serialize;
use serde::ser::SerializeStruct;
use tabula_processing::PrepError;
use thiserror::Error;

/// The main error type for training, evaluation and chart rendering.
#[derive(Error, Debug)]
pub enum LearningError {
    /// The requested algorithm is not in the catalog.
    ///
    /// Algorithm names are matched case-sensitively against the catalog
    /// entries, e.g. `"Random Forest"`.
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// The selected algorithm does not support the detected task type.
    ///
    /// Regression-only algorithms cannot train on a classification target
    /// and vice versa.
    #[error("Algorithm '{algorithm}' does not support {task_type} tasks")]
    AlgorithmTaskMismatch {
        algorithm: String,
        task_type: String,
    },

    /// Fitting needs at least one training row with a usable target value.
    #[error("Training set is empty")]
    EmptyTrainSet,

    /// Evaluation needs at least one test row.
    #[error("Test set is empty")]
    EmptyTestSet,

    /// Predictions and actuals must be evaluated pairwise.
    #[error("Prediction count {predicted} does not match test row count {actual}")]
    PredictionLengthMismatch { predicted: usize, actual: usize },

    /// An operation was requested in a session state that does not allow it.
    ///
    /// The workflow is strictly ordered: load data, configure, train,
    /// render charts.
    #[error("Cannot {action} while session is in the '{state}' state")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    /// A data preparation error from the processing crate.
    #[error(transparent)]
    Prep(#[from] PrepError),
}

impl LearningError {
    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAlgorithm(_) => "UNKNOWN_ALGORITHM",
            Self::AlgorithmTaskMismatch { .. } => "ALGORITHM_TASK_MISMATCH",
            Self::EmptyTrainSet => "EMPTY_TRAIN_SET",
            Self::EmptyTestSet => "EMPTY_TEST_SET",
            Self::PredictionLengthMismatch { .. } => "PREDICTION_LENGTH_MISMATCH",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::Prep(inner) => inner.error_code(),
        }
    }
}

/// Serialize implementation for IPC compatibility, matching the
/// `{code, message}` shape of the processing crate's errors.
impl Serialize for LearningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("LearningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for training operations.
pub type Result<T> = std::result::Result<T, LearningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LearningError::UnknownAlgorithm("Perceptron".to_string());
        assert_eq!(err.to_string(), "Unknown algorithm 'Perceptron'");

        let err = LearningError::InvalidState {
            action: "train",
            state: "idle",
        };
        assert!(err.to_string().contains("train"));
        assert!(err.to_string().contains("idle"));
    }

    #[test]
    fn test_prep_error_passes_through() {
        let err = LearningError::from(PrepError::NoFeaturesSelected);
        assert_eq!(err.to_string(), PrepError::NoFeaturesSelected.to_string());
        assert_eq!(err.error_code(), "NO_FEATURES_SELECTED");
    }

    #[test]
    fn test_error_serialization() {
        let err = LearningError::EmptyTestSet;
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("EMPTY_TEST_SET"));
        assert!(json.contains("Test set is empty"));
    }
}
