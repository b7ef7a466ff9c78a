//! Mock predictors behind a common [`Predictor`] trait.
//!
//! The predictors imitate the shape of a real model API (fit on train
//! rows, predict over test rows) while producing statistically plausible
//! fakes: the classifier guesses labels and then forces a 70-90% hit
//! rate, the regressor perturbs the true values with noise scaled to the
//! training distribution.

use crate::error::{LearningError, Result};
use rand::{Rng, RngCore};
use tabula_processing::{Cell, Row, TaskType};
use tracing::debug;

/// A model that can be fitted on training rows and asked for one
/// prediction per test row.
pub trait Predictor {
    /// Fit on the training rows for the given target column.
    fn fit(&mut self, train_rows: &[Row], target: &str) -> Result<()>;

    /// Predict one cell per test row, in order.
    ///
    /// Must be called after [`fit`](Predictor::fit).
    fn predict(&self, test_rows: &[Row], target: &str, rng: &mut dyn RngCore)
    -> Result<Vec<Cell>>;
}

/// Build the mock predictor for a task type.
pub fn predictor_for(task_type: TaskType) -> Box<dyn Predictor> {
    match task_type {
        TaskType::Classification => Box::new(RandomClassifier::default()),
        TaskType::Regression => Box::new(RandomRegressor::default()),
    }
}

/// Classification mock: remembers the distinct training labels, guesses
/// among them, then overwrites a 70-90% prefix with the true labels.
#[derive(Debug, Default)]
pub struct RandomClassifier {
    classes: Vec<String>,
}

impl RandomClassifier {
    /// Distinct labels seen during fitting, in first-seen order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl Predictor for RandomClassifier {
    fn fit(&mut self, train_rows: &[Row], target: &str) -> Result<()> {
        self.classes.clear();
        for row in train_rows {
            if let Some(cell) = row.get(target) {
                let label = cell.to_string();
                if !self.classes.contains(&label) {
                    self.classes.push(label);
                }
            }
        }
        if self.classes.is_empty() {
            return Err(LearningError::EmptyTrainSet);
        }
        debug!(classes = self.classes.len(), "fitted mock classifier");
        Ok(())
    }

    fn predict(
        &self,
        test_rows: &[Row],
        target: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Cell>> {
        if self.classes.is_empty() {
            return Err(LearningError::EmptyTrainSet);
        }

        let mut predictions: Vec<Cell> = test_rows
            .iter()
            .map(|_| Cell::text(&self.classes[rng.gen_range(0..self.classes.len())]))
            .collect();

        // Force a plausible hit rate on a prefix of the predictions.
        let accuracy = 0.7 + rng.r#gen::<f64>() * 0.2;
        let correct_count = (predictions.len() as f64 * accuracy).floor() as usize;
        for (prediction, row) in predictions.iter_mut().zip(test_rows).take(correct_count) {
            if let Some(actual) = row.get(target) {
                *prediction = actual.clone();
            }
        }

        Ok(predictions)
    }
}

/// Regression mock: learns the mean and standard deviation of the
/// training target, then returns the true test values plus noise scaled
/// to 0.3 standard deviations.
#[derive(Debug, Default)]
pub struct RandomRegressor {
    mean: f64,
    std: f64,
}

impl RandomRegressor {
    /// Mean of the training target after fitting.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation of the training target after fitting.
    pub fn std(&self) -> f64 {
        self.std
    }
}

impl Predictor for RandomRegressor {
    fn fit(&mut self, train_rows: &[Row], target: &str) -> Result<()> {
        let values: Vec<f64> = train_rows
            .iter()
            .filter_map(|row| row.get(target).and_then(|c| c.numeric_value()))
            .collect();
        if values.is_empty() {
            return Err(LearningError::EmptyTrainSet);
        }

        let n = values.len() as f64;
        self.mean = values.iter().sum::<f64>() / n;
        self.std = (values.iter().map(|v| (v - self.mean).powi(2)).sum::<f64>() / n).sqrt();
        debug!(mean = self.mean, std = self.std, "fitted mock regressor");
        Ok(())
    }

    fn predict(
        &self,
        test_rows: &[Row],
        target: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Cell>> {
        Ok(test_rows
            .iter()
            .map(|row| {
                let actual = row
                    .get(target)
                    .and_then(|c| c.numeric_value())
                    .unwrap_or(self.mean);
                let noise = (rng.r#gen::<f64>() - 0.5) * self.std * 0.3;
                Cell::Number(actual + noise)
            })
            .collect())
    }
}
