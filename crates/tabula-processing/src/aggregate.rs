//! Aggregation for summary charts: per-category means and fixed-width
//! histogram bins.

use crate::error::{PrepError, Result};
use crate::types::{CategoryAggregate, Dataset, HistogramBin};
use std::collections::HashMap;

/// Group rows by the stringified value of `key_column` and reduce each
/// group to the mean of `value_column`, in first-seen key order.
///
/// Value cells that do not parse as numbers (including blanks) contribute
/// 0.0 — a lossy default kept for compatibility with the original
/// behavior rather than excluding those rows.
pub fn category_means(
    dataset: &Dataset,
    key_column: &str,
    value_column: &str,
) -> Result<Vec<CategoryAggregate>> {
    if !dataset.has_column(key_column) {
        return Err(PrepError::ColumnNotFound(key_column.to_string()));
    }
    if !dataset.has_column(value_column) {
        return Err(PrepError::ColumnNotFound(value_column.to_string()));
    }

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (f64, usize)> = HashMap::new();

    for row in dataset.rows() {
        let key = row
            .get(key_column)
            .map(|c| c.to_string())
            .unwrap_or_default();
        let value = row
            .get(value_column)
            .and_then(|c| c.numeric_value())
            .unwrap_or(0.0);

        let entry = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (0.0, 0)
        });
        entry.0 += value;
        entry.1 += 1;
    }

    Ok(order
        .into_iter()
        .map(|key| {
            let (sum, count) = groups[&key];
            CategoryAggregate {
                mean: sum / count as f64,
                key,
            }
        })
        .collect())
}

/// Bin a numeric sequence into `bin_count` fixed-width intervals over
/// `[min, max]`.
///
/// Bin `i` spans `[min + i*width, min + (i+1)*width)`; the last bin is
/// closed on both ends so the maximum is counted. When all values are
/// equal the width is zero and every count lands in bin 0.
///
/// # Errors
///
/// [`PrepError::InvalidBinCount`] for a zero bin count,
/// [`PrepError::NoValidData`] for an empty sequence.
pub fn histogram(values: &[f64], bin_count: usize) -> Result<Vec<HistogramBin>> {
    if bin_count == 0 {
        return Err(PrepError::InvalidBinCount(bin_count));
    }
    if values.is_empty() {
        return Err(PrepError::NoValidData);
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    if width == 0.0 {
        // Degenerate range: every bin has identical bounds, bin 0 takes all.
        bins[0].count = values.len();
        return Ok(bins);
    }

    let last = bin_count - 1;
    for &value in values {
        for (i, bin) in bins.iter_mut().enumerate() {
            let in_bin = if i == last {
                value >= bin.lower && value <= bin.upper
            } else {
                value >= bin.lower && value < bin.upper
            };
            if in_bin {
                bin.count += 1;
                break;
            }
        }
    }

    Ok(bins)
}

/// Histogram over one dataset column, dropping cells that do not parse as
/// numbers before binning.
pub fn histogram_for_column(
    dataset: &Dataset,
    column: &str,
    bin_count: usize,
) -> Result<Vec<HistogramBin>> {
    let values: Vec<f64> = dataset
        .column(column)?
        .into_iter()
        .filter_map(|cell| cell.numeric_value())
        .collect();
    histogram(&values, bin_count)
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
    fn test_category_means_first_seen_order() {
        let dataset = dataset_from_json(vec![
            json!({"cat": "A", "val": "10"}),
            json!({"cat": "A", "val": "20"}),
            json!({"cat": "B", "val": "5"}),
        ]);

        let aggregates = category_means(&dataset, "cat", "val").unwrap();
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].key, "A");
        assert_eq!(aggregates[0].mean, 15.0);
        assert_eq!(aggregates[1].key, "B");
        assert_eq!(aggregates[1].mean, 5.0);
    }

    #[test]
    fn test_category_means_unparsable_counts_as_zero() {
        let dataset = dataset_from_json(vec![
            json!({"cat": "A", "val": "10"}),
            json!({"cat": "A", "val": "oops"}),
        ]);

        let aggregates = category_means(&dataset, "cat", "val").unwrap();
        assert_eq!(aggregates[0].mean, 5.0);
    }

    #[test]
    fn test_category_means_unknown_column() {
        let dataset = dataset_from_json(vec![json!({"cat": "A", "val": "1"})]);
        assert!(matches!(
            category_means(&dataset, "nope", "val"),
            Err(PrepError::ColumnNotFound(_))
        ));
        assert!(matches!(
            category_means(&dataset, "cat", "nope"),
            Err(PrepError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_histogram_ten_values_ten_bins() {
        let values: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let bins = histogram(&values, 10).unwrap();

        assert_eq!(bins.len(), 10);
        for bin in &bins {
            assert!((bin.upper - bin.lower - 0.9).abs() < 1e-9);
        }
        assert!((bins[0].lower - 1.0).abs() < 1e-9);
        assert!((bins[0].upper - 1.9).abs() < 1e-9);
        assert!((bins[9].lower - 9.1).abs() < 1e-9);
        assert!((bins[9].upper - 10.0).abs() < 1e-9);

        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 10);
        // The maximum lands in the closed last bin.
        assert_eq!(bins[9].count, 1);
    }

    #[test]
    fn test_histogram_constant_sequence_no_division_error() {
        let bins = histogram(&[5.0, 5.0, 5.0], 4).unwrap();
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].count, 3);
        assert!(bins[1..].iter().all(|b| b.count == 0));
        assert_eq!(bins[0].lower, bins[0].upper);
    }

    #[test]
    fn test_histogram_invalid_bin_count() {
        let err = histogram(&[1.0, 2.0], 0).unwrap_err();
        assert!(matches!(err, PrepError::InvalidBinCount(0)));
    }

    #[test]
    fn test_histogram_empty_sequence() {
        let err = histogram(&[], 5).unwrap_err();
        assert!(matches!(err, PrepError::NoValidData));
    }

    #[test]
    fn test_histogram_for_column_drops_unparsable() {
        let dataset = dataset_from_json(vec![
            json!({"x": "1"}),
            json!({"x": "junk"}),
            json!({"x": "3"}),
        ]);

        let bins = histogram_for_column(&dataset, "x", 2).unwrap();
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
    }
}
