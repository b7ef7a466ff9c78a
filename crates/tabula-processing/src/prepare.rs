//! Feature/target extraction, train/test splitting and task-type detection.
//!
//! This is the per-training-run path: filter rows for completeness, coerce
//! feature values to numbers where they parse, shuffle fairly, split at the
//! requested ratio and classify the target. Each call builds a fresh
//! [`PreparedSet`]; nothing is retained between runs.

use crate::error::{PrepError, Result};
use crate::types::{Cell, Dataset, PreparedSet, Row, TaskType};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::debug;

/// Distinct-value threshold above which an all-numeric target counts as
/// regression. Small numeric cardinalities (e.g. classes encoded 0/1/2)
/// stay classification.
const REGRESSION_DISTINCT_THRESHOLD: usize = 10;

/// Prepare a dataset for one training run, using the thread RNG for the
/// shuffle. See [`prepare_with_rng`] for the deterministic-RNG variant.
pub fn prepare(
    dataset: &Dataset,
    target: &str,
    features: &[String],
    split_ratio: f64,
) -> Result<PreparedSet> {
    prepare_with_rng(dataset, target, features, split_ratio, &mut rand::thread_rng())
}

/// Prepare a dataset for one training run.
///
/// 1. Retain rows where the target and every feature are non-blank.
/// 2. Coerce feature values to numbers where they parse as finite; the
///    target value is preserved unchanged.
/// 3. Shuffle the retained rows uniformly (Fisher–Yates).
/// 4. Split at `floor(split_ratio * n)`: first segment trains, rest tests.
///
/// The task type is detected over the full coerced set, before splitting.
///
/// # Errors
///
/// - [`PrepError::NoFeaturesSelected`] if `features` is empty (or contains
///   only the target column).
/// - [`PrepError::InvalidSplitRatio`] if the ratio is outside `[0, 1]` or
///   not finite. The closed endpoints are legal: 0 yields an empty training
///   set, 1 an empty test set.
/// - [`PrepError::ColumnNotFound`] if the target or a feature is not in the
///   dataset schema.
/// - [`PrepError::EmptyAfterFiltering`] if no row survives the
///   completeness filter.
pub fn prepare_with_rng(
    dataset: &Dataset,
    target: &str,
    features: &[String],
    split_ratio: f64,
    rng: &mut impl Rng,
) -> Result<PreparedSet> {
    if !split_ratio.is_finite() || !(0.0..=1.0).contains(&split_ratio) {
        return Err(PrepError::InvalidSplitRatio(split_ratio));
    }

    // The target never doubles as a feature.
    let features: Vec<String> = features
        .iter()
        .filter(|f| f.as_str() != target)
        .cloned()
        .collect();
    if features.is_empty() {
        return Err(PrepError::NoFeaturesSelected);
    }

    if !dataset.has_column(target) {
        return Err(PrepError::ColumnNotFound(target.to_string()));
    }
    for feature in &features {
        if !dataset.has_column(feature) {
            return Err(PrepError::ColumnNotFound(feature.clone()));
        }
    }

    let mut prepared: Vec<Row> = dataset
        .rows()
        .iter()
        .filter(|row| {
            row.get(target).is_some_and(|c| !c.is_blank())
                && features
                    .iter()
                    .all(|f| row.get(f).is_some_and(|c| !c.is_blank()))
        })
        .map(|row| coerce_row(row, target, &features))
        .collect();

    if prepared.is_empty() {
        return Err(PrepError::EmptyAfterFiltering);
    }

    let task_type = detect_task_type(&prepared, target);

    prepared.shuffle(rng);
    let (train_rows, test_rows) = split_rows(prepared, split_ratio);

    debug!(
        target,
        feature_count = features.len(),
        train = train_rows.len(),
        test = test_rows.len(),
        task = %task_type,
        "prepared dataset for training"
    );

    Ok(PreparedSet {
        features,
        target: target.to_string(),
        train_rows,
        test_rows,
        task_type,
    })
}

/// Project one row onto target + features, coercing feature cells that
/// parse as finite numbers. The target cell is carried over unchanged.
fn coerce_row(row: &Row, target: &str, features: &[String]) -> Row {
    let mut out = Row::with_capacity(features.len() + 1);
    out.insert(
        target.to_string(),
        row.get(target).cloned().unwrap_or(Cell::Missing),
    );
    for feature in features {
        let cell = row.get(feature).cloned().unwrap_or(Cell::Missing);
        let coerced = match cell.numeric_value() {
            Some(n) => Cell::Number(n),
            None => cell,
        };
        out.insert(feature.clone(), coerced);
    }
    out
}

/// Split `rows` at `floor(ratio * n)`: the first segment is the training
/// set, the remainder the test set. Exact for every ratio in `[0, 1]`.
pub fn split_rows(rows: Vec<Row>, ratio: f64) -> (Vec<Row>, Vec<Row>) {
    let split_index = ((rows.len() as f64) * ratio).floor() as usize;
    let mut train = rows;
    let test = train.split_off(split_index.min(train.len()));
    (train, test)
}

/// Infer regression vs classification from the target column.
///
/// Regression iff every distinct target value parses as a finite number
/// and there are more than [`REGRESSION_DISTINCT_THRESHOLD`] distinct
/// values; otherwise classification.
pub fn detect_task_type(rows: &[Row], target: &str) -> TaskType {
    let distinct: HashSet<String> = rows
        .iter()
        .filter_map(|row| row.get(target))
        .map(|cell| cell.to_string())
        .collect();

    let all_numeric = !distinct.is_empty()
        && distinct
            .iter()
            .all(|value| crate::utils::parse_numeric(value).is_some());

    if all_numeric && distinct.len() > REGRESSION_DISTINCT_THRESHOLD {
        TaskType::Regression
    } else {
        TaskType::Classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::normalize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn dataset_from_json(rows: Vec<serde_json::Value>) -> Dataset {
        let records = rows
            .into_iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect();
        normalize(records).unwrap()
    }

    fn numbered_dataset(n: usize) -> Dataset {
        dataset_from_json(
            (0..n)
                .map(|i| json!({"x": i.to_string(), "y": (i * 2).to_string()}))
                .collect(),
        )
    }

    #[test]
    fn test_prepare_filters_incomplete_rows() {
        let dataset = dataset_from_json(vec![
            json!({"x": "1", "y": "10"}),
            json!({"x": null, "y": "20"}),
            json!({"x": "3", "y": ""}),
            json!({"x": "4", "y": "40"}),
        ]);

        let set = prepare_with_rng(
            &dataset,
            "y",
            &["x".to_string()],
            0.5,
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap();

        assert_eq!(set.filtered_len(), 2);
        assert_eq!(set.train_rows.len(), 1);
        assert_eq!(set.test_rows.len(), 1);
    }

    #[test]
    fn test_prepare_coerces_features_not_target() {
        let dataset = dataset_from_json(vec![json!({"x": "1.5", "label": "01"})]);

        let set = prepare_with_rng(
            &dataset,
            "label",
            &["x".to_string()],
            1.0,
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap();

        let row = &set.train_rows[0];
        assert_eq!(row["x"], Cell::Number(1.5));
        // Target text is preserved verbatim, not coerced to 1.
        assert_eq!(row["label"], Cell::text("01"));
    }

    #[test]
    fn test_split_sizes_exact_for_all_ratios() {
        for n in [1usize, 4, 10, 37] {
            for ratio in [0.0, 0.3, 0.5, 0.7, 1.0] {
                let dataset = numbered_dataset(n);
                let set = prepare_with_rng(
                    &dataset,
                    "y",
                    &["x".to_string()],
                    ratio,
                    &mut StdRng::seed_from_u64(42),
                )
                .unwrap();

                let expected_train = ((n as f64) * ratio).floor() as usize;
                assert_eq!(set.train_rows.len(), expected_train, "n={n} r={ratio}");
                assert_eq!(set.filtered_len(), n, "n={n} r={ratio}");
            }
        }
    }

    #[test]
    fn test_split_is_a_partition() {
        let dataset = numbered_dataset(20);
        let set = prepare_with_rng(
            &dataset,
            "y",
            &["x".to_string()],
            0.7,
            &mut StdRng::seed_from_u64(11),
        )
        .unwrap();

        let mut seen: Vec<String> = set
            .train_rows
            .iter()
            .chain(set.test_rows.iter())
            .map(|row| row["x"].to_string())
            .collect();
        seen.sort_by(|a, b| a.parse::<u32>().unwrap().cmp(&b.parse::<u32>().unwrap()));

        let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_empty_feature_list_rejected() {
        let dataset = numbered_dataset(5);
        let err = prepare(&dataset, "y", &[], 0.8).unwrap_err();
        assert!(matches!(err, PrepError::NoFeaturesSelected));

        // A feature list that collapses to nothing once the target is
        // removed counts as empty too.
        let err = prepare(&dataset, "y", &["y".to_string()], 0.8).unwrap_err();
        assert!(matches!(err, PrepError::NoFeaturesSelected));
    }

    #[test]
    fn test_all_rows_missing_feature_rejected() {
        let dataset = dataset_from_json(vec![
            json!({"x": null, "y": "1"}),
            json!({"x": "", "y": "2"}),
        ]);

        let err = prepare(&dataset, "y", &["x".to_string()], 0.8).unwrap_err();
        assert!(matches!(err, PrepError::EmptyAfterFiltering));
    }

    #[test]
    fn test_invalid_split_ratio_rejected() {
        let dataset = numbered_dataset(5);
        for ratio in [-0.1, 1.1, f64::NAN] {
            let err = prepare(&dataset, "y", &["x".to_string()], ratio).unwrap_err();
            assert!(matches!(err, PrepError::InvalidSplitRatio(_)), "r={ratio}");
        }
    }

    #[test]
    fn test_unknown_columns_rejected() {
        let dataset = numbered_dataset(5);
        let err = prepare(&dataset, "nope", &["x".to_string()], 0.8).unwrap_err();
        assert!(matches!(err, PrepError::ColumnNotFound(_)));

        let err = prepare(&dataset, "y", &["ghost".to_string()], 0.8).unwrap_err();
        assert!(matches!(err, PrepError::ColumnNotFound(_)));
    }

    #[test]
    fn test_task_type_non_numeric_labels() {
        let rows: Vec<Row> = ["a", "b", "a", "c"]
            .iter()
            .map(|v| Row::from([("t".to_string(), Cell::text(*v))]))
            .collect();
        assert_eq!(detect_task_type(&rows, "t"), TaskType::Classification);
    }

    #[test]
    fn test_task_type_many_distinct_numbers_is_regression() {
        let rows: Vec<Row> = (0..12)
            .map(|i| Row::from([("t".to_string(), Cell::Number(i as f64))]))
            .collect();
        assert_eq!(detect_task_type(&rows, "t"), TaskType::Regression);
    }

    #[test]
    fn test_task_type_few_distinct_numbers_is_classification() {
        let rows: Vec<Row> = [1.0, 2.0, 3.0, 1.0, 2.0]
            .iter()
            .map(|v| Row::from([("t".to_string(), Cell::Number(*v))]))
            .collect();
        assert_eq!(detect_task_type(&rows, "t"), TaskType::Classification);
    }

    #[test]
    fn test_task_type_boundary_at_threshold() {
        // Exactly 10 distinct numeric values stays classification; 11 flips.
        let rows: Vec<Row> = (0..10)
            .map(|i| Row::from([("t".to_string(), Cell::Number(i as f64))]))
            .collect();
        assert_eq!(detect_task_type(&rows, "t"), TaskType::Classification);

        let rows: Vec<Row> = (0..11)
            .map(|i| Row::from([("t".to_string(), Cell::Number(i as f64))]))
            .collect();
        assert_eq!(detect_task_type(&rows, "t"), TaskType::Regression);
    }
}
