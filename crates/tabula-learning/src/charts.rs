//! Chart series generators for the results dashboard.
//!
//! Each generator produces plain serializable series data; drawing is the
//! frontend's job. Feature importance and the learning curve exist for
//! every trained model, the confusion matrix and ROC curve only for
//! classification.

use rand::{Rng, RngCore};
use serde::Serialize;
use tabula_processing::TaskType;

/// Normalized importance weight for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Square count matrix with one row and column per class label.
///
/// `matrix[i][j]` counts test rows of actual class `i` predicted as
/// class `j`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    pub classes: Vec<String>,
    pub matrix: Vec<Vec<u32>>,
}

/// Training and validation scores over growing training-set sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningCurve {
    pub training_sizes: Vec<u32>,
    pub training_scores: Vec<f64>,
    pub validation_scores: Vec<f64>,
}

/// One point on the ROC curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

/// The full chart payload for one training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub feature_importance: Vec<FeatureImportance>,
    pub learning_curve: LearningCurve,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<ConfusionMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roc_curve: Option<Vec<RocPoint>>,
}

/// Render every chart applicable to the task type.
pub fn render(
    task_type: TaskType,
    features: &[String],
    classes: &[String],
    rng: &mut dyn RngCore,
) -> ChartSet {
    let confusion = match task_type {
        TaskType::Classification => Some(confusion_matrix(classes, rng)),
        TaskType::Regression => None,
    };
    let roc = match task_type {
        TaskType::Classification => Some(roc_curve(rng)),
        TaskType::Regression => None,
    };

    ChartSet {
        feature_importance: feature_importance(features, rng),
        learning_curve: learning_curve(rng),
        confusion_matrix: confusion,
        roc_curve: roc,
    }
}

/// Random importance per feature, normalized to sum to 1.0.
pub fn feature_importance(features: &[String], rng: &mut dyn RngCore) -> Vec<FeatureImportance> {
    let raw: Vec<f64> = features.iter().map(|_| rng.r#gen::<f64>()).collect();
    let total: f64 = raw.iter().sum();

    features
        .iter()
        .zip(raw)
        .map(|(feature, weight)| FeatureImportance {
            feature: feature.clone(),
            importance: if total > 0.0 { weight / total } else { 0.0 },
        })
        .collect()
}

/// Mock confusion counts: a strong diagonal (20-49 per class) with light
/// off-diagonal confusion (0-9).
pub fn confusion_matrix(classes: &[String], rng: &mut dyn RngCore) -> ConfusionMatrix {
    let matrix = (0..classes.len())
        .map(|i| {
            (0..classes.len())
                .map(|j| {
                    if i == j {
                        20 + rng.gen_range(0..30)
                    } else {
                        rng.gen_range(0..10)
                    }
                })
                .collect()
        })
        .collect();

    ConfusionMatrix {
        classes: classes.to_vec(),
        matrix,
    }
}

/// Ten points at training sizes 10..=100, training scores in
/// [0.6, 0.9) and validation scores in [0.5, 0.85).
pub fn learning_curve(rng: &mut dyn RngCore) -> LearningCurve {
    let training_sizes: Vec<u32> = (1..=10).map(|i| i * 10).collect();
    let training_scores = training_sizes
        .iter()
        .map(|_| 0.6 + rng.r#gen::<f64>() * 0.3)
        .collect();
    let validation_scores = training_sizes
        .iter()
        .map(|_| 0.5 + rng.r#gen::<f64>() * 0.35)
        .collect();

    LearningCurve {
        training_sizes,
        training_scores,
        validation_scores,
    }
}

/// 100 points with the true-positive rate tracking above the diagonal:
/// `tpr = min(1, fpr + 0.3 + U(0, 0.4))`.
pub fn roc_curve(rng: &mut dyn RngCore) -> Vec<RocPoint> {
    (0..100)
        .map(|i| {
            let fpr = i as f64 / 100.0;
            let tpr = (fpr + 0.3 + rng.r#gen::<f64>() * 0.4).min(1.0);
            RocPoint { fpr, tpr }
        })
        .collect()
}
