//! Mock Model Training Library
//!
//! The training side of the mock machine-learning workbench. It consumes
//! prepared data from `tabula-processing` and produces everything the
//! results dashboard shows:
//!
//! - **Catalog**: seven classic algorithms with descriptions and task
//!   type filtering
//! - **Predictors**: mock models behind a [`Predictor`] trait that fit on
//!   train rows and predict over test rows
//! - **Metrics**: classification accuracy and full regression metrics
//!   computed from the prediction/actual pairs
//! - **Charts**: serializable series for feature importance, confusion
//!   matrix, learning curve and ROC curve
//! - **Session**: the [`Session`] state machine ordering the workflow
//!   from data load to rendered charts
//!
//! No real learning happens anywhere: the predictors fabricate
//! statistically plausible outputs so the surrounding application can be
//! exercised end to end without an ML backend.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabula_learning::{Session, TrainingConfig};
//! use tabula_processing::samples::{self, SampleKind};
//!
//! let mut session = Session::new();
//! session.load_data(samples::generate(SampleKind::Iris));
//! session.configure(TrainingConfig {
//!     target: "species".to_string(),
//!     features: vec!["petal_length".to_string(), "petal_width".to_string()],
//!     algorithm: "Random Forest".to_string(),
//!     split_ratio: 0.8,
//! })?;
//! session.train()?;
//! let charts = session.render_charts()?;
//! println!("importances: {:?}", charts.feature_importance);
//! ```

pub mod catalog;
pub mod charts;
pub mod error;
pub mod metrics;
pub mod predictor;
pub mod session;
pub mod types;

// Re-exports for convenient access
pub use catalog::{Algorithm, AlgorithmTask};
pub use charts::{ChartSet, ConfusionMatrix, FeatureImportance, LearningCurve, RocPoint};
pub use error::{LearningError, Result as LearningResult};
pub use metrics::evaluate;
pub use predictor::{Predictor, RandomClassifier, RandomRegressor, predictor_for};
pub use session::{Session, SessionState, TrainingConfig};
pub use types::{Metrics, TrainingOutcome};
