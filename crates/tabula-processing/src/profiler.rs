//! Column profiling: numeric/categorical classification and missing-value
//! counts, plus the preview summary shown before training.

use crate::types::{ColumnProfile, Dataset, DatasetSummary};
use tracing::debug;

/// Profiler over an immutable [`Dataset`]. Profiles are derived fresh on
/// every call; re-profiling the same dataset always yields identical
/// results.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of the dataset.
    ///
    /// A column is numerical iff it has at least one non-blank value and
    /// every non-blank value parses as a finite number. A column with zero
    /// non-blank values is categorical by convention — there is nothing to
    /// test as numeric.
    pub fn profile_columns(dataset: &Dataset) -> Vec<ColumnProfile> {
        dataset
            .columns()
            .iter()
            .map(|name| Self::profile_column(dataset, name))
            .collect()
    }

    fn profile_column(dataset: &Dataset, name: &str) -> ColumnProfile {
        let mut missing_count = 0;
        let mut non_blank = 0;
        let mut all_numeric = true;

        for row in dataset.rows() {
            let cell = row.get(name);
            match cell {
                None => missing_count += 1,
                Some(cell) if cell.is_blank() => missing_count += 1,
                Some(cell) => {
                    non_blank += 1;
                    if cell.numeric_value().is_none() {
                        all_numeric = false;
                    }
                }
            }
        }

        ColumnProfile {
            name: name.to_string(),
            is_numerical: non_blank > 0 && all_numeric,
            missing_count,
        }
    }

    /// Dataset-level preview statistics.
    pub fn summarize(dataset: &Dataset) -> DatasetSummary {
        let profiles = Self::profile_columns(dataset);
        let numerical_columns = profiles.iter().filter(|p| p.is_numerical).count();
        let total_missing = profiles.iter().map(|p| p.missing_count).sum();

        let summary = DatasetSummary {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            numerical_columns,
            categorical_columns: profiles.len() - numerical_columns,
            total_missing,
        };

        debug!(
            rows = summary.row_count,
            columns = summary.column_count,
            numerical = summary.numerical_columns,
            categorical = summary.categorical_columns,
            missing = summary.total_missing,
            "profiled dataset"
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::normalize;
    use serde_json::json;

    fn dataset_from_json(rows: Vec<serde_json::Value>) -> Dataset {
        let records = rows
            .into_iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect();
        normalize(records).unwrap()
    }

    #[test]
    fn test_numeric_column_detection() {
        let dataset = dataset_from_json(vec![
            json!({"num": "1.5", "cat": "a", "native": 3}),
            json!({"num": "2", "cat": "b", "native": 4}),
        ]);

        let profiles = DataProfiler::profile_columns(&dataset);
        assert!(profiles[0].is_numerical);
        assert!(!profiles[1].is_numerical);
        assert!(profiles[2].is_numerical);
    }

    #[test]
    fn test_mixed_column_is_categorical() {
        // A single non-numeric value makes the whole column categorical.
        let dataset = dataset_from_json(vec![
            json!({"col": "1"}),
            json!({"col": "two"}),
            json!({"col": "3"}),
        ]);

        let profiles = DataProfiler::profile_columns(&dataset);
        assert!(!profiles[0].is_numerical);
    }

    #[test]
    fn test_missing_values_ignored_for_numeric_check() {
        let dataset = dataset_from_json(vec![
            json!({"col": "1", "other": "x"}),
            json!({"col": null, "other": "y"}),
            json!({"col": "", "other": "z"}),
        ]);

        let profiles = DataProfiler::profile_columns(&dataset);
        assert!(profiles[0].is_numerical);
        assert_eq!(profiles[0].missing_count, 2);
    }

    #[test]
    fn test_all_missing_column_is_categorical() {
        // Zero non-missing values: categorical by convention.
        let dataset = dataset_from_json(vec![
            json!({"empty": null, "keep": 1}),
            json!({"empty": "", "keep": 2}),
        ]);

        let profiles = DataProfiler::profile_columns(&dataset);
        assert!(!profiles[0].is_numerical);
        assert_eq!(profiles[0].missing_count, 2);
    }

    #[test]
    fn test_summary_counts_partition_columns() {
        let dataset = dataset_from_json(vec![
            json!({"a": 1, "b": "x", "c": null, "d": 2.5}),
            json!({"a": 2, "b": "y", "c": "z", "d": ""}),
        ]);

        let summary = DataProfiler::summarize(&dataset);
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.column_count, 4);
        assert_eq!(
            summary.numerical_columns + summary.categorical_columns,
            summary.column_count
        );
        assert_eq!(summary.total_missing, 2);
    }

    #[test]
    fn test_profiling_is_idempotent() {
        let dataset = dataset_from_json(vec![
            json!({"a": 1, "b": "x"}),
            json!({"a": null, "b": "y"}),
        ]);

        let first = DataProfiler::summarize(&dataset);
        let second = DataProfiler::summarize(&dataset);
        assert_eq!(first, second);
        assert_eq!(
            DataProfiler::profile_columns(&dataset),
            DataProfiler::profile_columns(&dataset)
        );
    }
}
