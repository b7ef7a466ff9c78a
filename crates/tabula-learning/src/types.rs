//! Common types returned by the mock training layer.
//!
//! - [`Metrics`]: evaluation metrics (classification or regression)
//! - [`TrainingOutcome`]: everything one training run produced

use serde::{Deserialize, Serialize};
use tabula_processing::{Cell, PreparedSet};

/// Metrics from model evaluation.
///
/// Contains optional fields for both classification and regression; only
/// the fields relevant to the task type are populated.
///
/// # Classification Metrics
///
/// - `accuracy`: fraction of exact prediction matches
/// - `precision`, `recall`: mocked weighted averages
/// - `f1_score`: harmonic mean of precision and recall
///
/// # Regression Metrics
///
/// - `mse`: Mean Squared Error
/// - `rmse`: Root Mean Squared Error
/// - `mae`: Mean Absolute Error
/// - `r2`: coefficient of determination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    // Classification metrics
    /// Accuracy score (classification only). Range: [0.0, 1.0].
    pub accuracy: Option<f64>,

    /// Precision score (classification only). Range: [0.0, 1.0].
    pub precision: Option<f64>,

    /// Recall score (classification only). Range: [0.0, 1.0].
    pub recall: Option<f64>,

    /// F1 score (classification only). Range: [0.0, 1.0].
    pub f1_score: Option<f64>,

    // Regression metrics
    /// Mean Squared Error (regression only). Lower is better.
    pub mse: Option<f64>,

    /// Root Mean Squared Error (regression only), in target units.
    pub rmse: Option<f64>,

    /// Mean Absolute Error (regression only). Lower is better.
    pub mae: Option<f64>,

    /// R-squared score (regression only). Range: (-∞, 1.0].
    pub r2: Option<f64>,
}

/// Result of one training run.
///
/// Bundles the prepared data the run was made from, the per-test-row
/// predictions and the evaluation metrics.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Name of the algorithm as listed in the catalog.
    pub algorithm: String,

    /// The prepared split the model was trained and evaluated on.
    pub prepared: PreparedSet,

    /// One prediction per test row, in test row order.
    pub predictions: Vec<Cell>,

    /// Metrics over the test set.
    pub metrics: Metrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_default_is_all_none() {
        let metrics = Metrics::default();
        assert!(metrics.accuracy.is_none());
        assert!(metrics.r2.is_none());
    }

    #[test]
    fn test_metrics_serialization_round_trip() {
        let metrics = Metrics {
            accuracy: Some(0.85),
            f1_score: Some(0.8),
            ..Default::default()
        };
        let json = serde_json::to_string(&metrics).unwrap();
        let back: Metrics = serde_json::from_str(&json).unwrap();
        assert_eq!(metrics, back);
    }
}
