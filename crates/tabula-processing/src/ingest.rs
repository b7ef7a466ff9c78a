//! Ingestion normalizer: raw parsed records to a clean [`Dataset`].
//!
//! Raw records are what a CSV/XLSX decoding collaborator produces — ordered
//! string-keyed maps whose values are string, number, null or absent. The
//! normalizer is a pure transformation: it drops records with no usable
//! value in any field and rejects inputs where nothing survives.

use crate::error::{PrepError, Result};
use crate::types::{Cell, Dataset, Row};
use crate::utils::is_blank_value;
use serde_json::Value;
use tracing::debug;

/// One raw parsed record. `serde_json`'s `preserve_order` feature keeps the
/// key order of the source, which becomes the dataset's column order.
pub type RawRecord = serde_json::Map<String, Value>;

/// Convert a sequence of raw records into a [`Dataset`].
///
/// Records where every field is null, empty-string or absent are dropped.
/// The column list is taken from the first surviving record; later records
/// are projected onto it (unknown keys dropped, absent keys filled with
/// [`Cell::Missing`]).
///
/// # Errors
///
/// [`PrepError::NoValidData`] if no record has at least one non-blank field.
pub fn normalize(records: Vec<RawRecord>) -> Result<Dataset> {
    let total = records.len();
    let kept: Vec<RawRecord> = records
        .into_iter()
        .filter(|record| record.values().any(|v| !is_blank_value(v)))
        .collect();

    debug!(
        total_records = total,
        kept_records = kept.len(),
        "normalized raw records"
    );

    let first = kept.first().ok_or(PrepError::NoValidData)?;
    let columns: Vec<String> = first.keys().cloned().collect();

    let rows: Vec<Row> = kept
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|col| {
                    let cell = record.get(col).map(value_to_cell).unwrap_or(Cell::Missing);
                    (col.clone(), cell)
                })
                .collect()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}

/// Map a raw parser value onto the cell model. Booleans and nested values
/// are tolerated by stringifying, since decoders differ in what they emit.
fn value_to_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Missing,
        Value::Number(n) => match n.as_f64() {
            Some(f) => Cell::Number(f),
            None => Cell::Missing,
        },
        Value::String(s) => Cell::Text(s.clone()),
        Value::Bool(b) => Cell::Text(b.to_string()),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_normalize_keeps_rows_with_any_value() {
        let records = vec![
            record(&[("a", json!(1)), ("b", json!("x"))]),
            record(&[("a", json!(null)), ("b", json!(""))]),
            record(&[("a", json!(null)), ("b", json!("y"))]),
        ];

        let dataset = normalize(records).unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.columns(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_normalize_all_blank_is_no_valid_data() {
        let records = vec![
            record(&[("a", json!(null)), ("b", json!(""))]),
            record(&[("a", json!("")), ("b", json!(null))]),
        ];

        let err = normalize(records).unwrap_err();
        assert!(matches!(err, PrepError::NoValidData));
    }

    #[test]
    fn test_normalize_empty_input_is_no_valid_data() {
        let err = normalize(Vec::new()).unwrap_err();
        assert!(matches!(err, PrepError::NoValidData));
    }

    #[test]
    fn test_normalize_fills_absent_keys_with_missing() {
        let records = vec![
            record(&[("a", json!(1)), ("b", json!(2))]),
            record(&[("a", json!(3))]),
        ];

        let dataset = normalize(records).unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows()[1]["b"], Cell::Missing);
    }

    #[test]
    fn test_normalize_drops_keys_outside_first_row_schema() {
        let records = vec![
            record(&[("a", json!(1))]),
            record(&[("a", json!(2)), ("extra", json!("ignored"))]),
        ];

        let dataset = normalize(records).unwrap();
        assert_eq!(dataset.column_count(), 1);
        assert!(!dataset.rows()[1].contains_key("extra"));
    }

    #[test]
    fn test_value_to_cell_variants() {
        assert_eq!(value_to_cell(&json!(2.5)), Cell::Number(2.5));
        assert_eq!(value_to_cell(&json!("x")), Cell::text("x"));
        assert_eq!(value_to_cell(&json!("")), Cell::text(""));
        assert_eq!(value_to_cell(&json!(null)), Cell::Missing);
        assert_eq!(value_to_cell(&json!(true)), Cell::text("true"));
    }

    #[test]
    fn test_empty_string_survives_as_cell_but_counts_as_blank() {
        // A record with one real value keeps its empty-string cells intact.
        let records = vec![record(&[("a", json!("x")), ("b", json!(""))])];
        let dataset = normalize(records).unwrap();
        let cell = &dataset.rows()[0]["b"];
        assert_eq!(*cell, Cell::text(""));
        assert!(cell.is_blank());
    }
}
