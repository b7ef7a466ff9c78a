//! A single-user training session: the state machine that ties loading,
//! configuration, training and chart rendering together.
//!
//! The workflow is ordered. Loading data is allowed at any point and
//! resets everything downstream; configuring requires data; training
//! requires a configuration; charts require a trained model.

use crate::catalog;
use crate::charts::{self, ChartSet};
use crate::error::{LearningError, Result};
use crate::metrics;
use crate::predictor::predictor_for;
use crate::types::TrainingOutcome;
use rand::Rng;
use tabula_processing::{Dataset, PrepError, prepare};
use tracing::info;

/// Where a session currently is in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    DataLoaded,
    Configured,
    Trained,
    Visualized,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::DataLoaded => "data_loaded",
            SessionState::Configured => "configured",
            SessionState::Trained => "trained",
            SessionState::Visualized => "visualized",
        }
    }
}

/// What to train: target, features, algorithm and split.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub target: String,
    pub features: Vec<String>,
    /// Catalog name of the algorithm, e.g. `"Random Forest"`.
    pub algorithm: String,
    /// Fraction of rows that go to the training set, within `[0, 1]`.
    pub split_ratio: f64,
}

/// One user's workflow from raw data to rendered charts.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    dataset: Option<Dataset>,
    config: Option<TrainingConfig>,
    outcome: Option<TrainingOutcome>,
    charts: Option<ChartSet>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn config(&self) -> Option<&TrainingConfig> {
        self.config.as_ref()
    }

    pub fn outcome(&self) -> Option<&TrainingOutcome> {
        self.outcome.as_ref()
    }

    pub fn charts(&self) -> Option<&ChartSet> {
        self.charts.as_ref()
    }

    /// Load a dataset, discarding any previous configuration and results.
    pub fn load_data(&mut self, dataset: Dataset) {
        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "session loaded dataset"
        );
        self.dataset = Some(dataset);
        self.config = None;
        self.outcome = None;
        self.charts = None;
        self.state = SessionState::DataLoaded;
    }

    /// Set the training configuration, discarding any previous results.
    ///
    /// Fails fast on an unknown algorithm, a missing target or feature
    /// column, or an empty feature selection, so the frontend can reject
    /// the form before training starts.
    pub fn configure(&mut self, config: TrainingConfig) -> Result<()> {
        let dataset = match &self.dataset {
            Some(dataset) => dataset,
            None => {
                return Err(LearningError::InvalidState {
                    action: "configure",
                    state: self.state().as_str(),
                });
            }
        };

        if catalog::find(&config.algorithm).is_none() {
            return Err(LearningError::UnknownAlgorithm(config.algorithm));
        }
        if !dataset.has_column(&config.target) {
            return Err(PrepError::ColumnNotFound(config.target).into());
        }
        for feature in &config.features {
            if !dataset.has_column(feature) {
                return Err(PrepError::ColumnNotFound(feature.clone()).into());
            }
        }
        if !config.features.iter().any(|f| f != &config.target) {
            return Err(PrepError::NoFeaturesSelected.into());
        }

        info!(
            target = %config.target,
            algorithm = %config.algorithm,
            features = config.features.len(),
            "session configured"
        );
        self.config = Some(config);
        self.outcome = None;
        self.charts = None;
        self.state = SessionState::Configured;
        Ok(())
    }

    /// Train with the thread RNG.
    pub fn train(&mut self) -> Result<()> {
        self.train_with_rng(&mut rand::thread_rng())
    }

    /// Prepare the data, fit the mock predictor and evaluate it.
    pub fn train_with_rng(&mut self, rng: &mut impl Rng) -> Result<()> {
        let (dataset, config) = match (&self.dataset, &self.config) {
            (Some(dataset), Some(config)) => (dataset, config),
            _ => {
                return Err(LearningError::InvalidState {
                    action: "train",
                    state: self.state().as_str(),
                });
            }
        };

        let prepared = prepare::prepare_with_rng(
            dataset,
            &config.target,
            &config.features,
            config.split_ratio,
            rng,
        )?;

        let algorithm = catalog::find(&config.algorithm)
            .ok_or_else(|| LearningError::UnknownAlgorithm(config.algorithm.clone()))?;
        if !algorithm.supports(prepared.task_type) {
            return Err(LearningError::AlgorithmTaskMismatch {
                algorithm: algorithm.name.to_string(),
                task_type: prepared.task_type.to_string(),
            });
        }

        let mut predictor = predictor_for(prepared.task_type);
        predictor.fit(&prepared.train_rows, &prepared.target)?;
        let predictions = predictor.predict(&prepared.test_rows, &prepared.target, rng)?;

        let metrics = metrics::evaluate(
            prepared.task_type,
            &prepared.test_rows,
            &prepared.target,
            &predictions,
            rng,
        )?;

        info!(
            algorithm = algorithm.name,
            task_type = %prepared.task_type,
            train_rows = prepared.train_rows.len(),
            test_rows = prepared.test_rows.len(),
            "session trained model"
        );
        self.outcome = Some(TrainingOutcome {
            algorithm: algorithm.name.to_string(),
            prepared,
            predictions,
            metrics,
        });
        self.charts = None;
        self.state = SessionState::Trained;
        Ok(())
    }

    /// Render charts with the thread RNG.
    pub fn render_charts(&mut self) -> Result<&ChartSet> {
        self.render_charts_with_rng(&mut rand::thread_rng())
    }

    /// Generate the chart payload for the last training run.
    pub fn render_charts_with_rng(&mut self, rng: &mut impl Rng) -> Result<&ChartSet> {
        let outcome = match &self.outcome {
            Some(outcome) => outcome,
            None => {
                return Err(LearningError::InvalidState {
                    action: "render charts",
                    state: self.state().as_str(),
                });
            }
        };

        let classes = test_classes(outcome);
        let charts = charts::render(
            outcome.prepared.task_type,
            &outcome.prepared.features,
            &classes,
            rng,
        );

        info!(state = "visualized", "session rendered charts");
        self.charts = Some(charts);
        self.state = SessionState::Visualized;
        Ok(self.charts.as_ref().unwrap())
    }
}

/// Distinct target labels of the test set, in first-seen order.
fn test_classes(outcome: &TrainingOutcome) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for row in &outcome.prepared.test_rows {
        if let Some(cell) = row.get(&outcome.prepared.target) {
            let label = cell.to_string();
            if !classes.contains(&label) {
                classes.push(label);
            }
        }
    }
    classes
}
