//! CSV decoding collaborator: reads a file with polars and hands the rows
//! to the ingestion normalizer as raw records.
//!
//! The core pipeline never sees polars types; everything downstream works
//! on [`RawRecord`]s and the cell model.

use crate::error::Result;
use crate::ingest::{self, RawRecord};
use crate::types::Dataset;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Read a CSV file into raw records (header row required).
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "decoded CSV file"
    );

    dataframe_to_records(&df)
}

/// Read a CSV file and normalize it into a [`Dataset`] in one step.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    ingest::normalize(read_records(path)?)
}

fn dataframe_to_records(df: &DataFrame) -> Result<Vec<RawRecord>> {
    let mut records = Vec::with_capacity(df.height());
    let columns = df.get_columns();

    for idx in 0..df.height() {
        let mut record = RawRecord::new();
        for column in columns {
            let series = column.as_materialized_series();
            let value = any_value_to_json(series.get(idx)?, series.dtype());
            record.insert(column.name().to_string(), value);
        }
        records.push(record);
    }

    Ok(records)
}

fn any_value_to_json(value: AnyValue<'_>, dtype: &DataType) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Boolean(b) => Value::String(b.to_string()),
        other if is_numeric_dtype(dtype) => match other.try_extract::<f64>() {
            Ok(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Err(_) => Value::String(format!("{}", other)),
        },
        other => Value::String(format!("{}", other)),
    }
}

/// Check if a DataType is numeric (integer or float).
fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_dataframe_to_records_mixed_types() {
        let df = df![
            "name" => ["alice", "bob"],
            "age" => [30i64, 41],
            "score" => [Some(0.5f64), None],
        ]
        .unwrap();

        let records = dataframe_to_records(&df).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], Value::String("alice".to_string()));
        assert_eq!(records[0]["age"], serde_json::json!(30.0));
        assert_eq!(records[1]["score"], Value::Null);
    }

    #[test]
    fn test_dataframe_round_trip_to_dataset() {
        let df = df![
            "x" => [1i64, 2, 3],
            "label" => ["a", "b", "a"],
        ]
        .unwrap();

        let records = dataframe_to_records(&df).unwrap();
        let dataset = ingest::normalize(records).unwrap();
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.rows()[0]["x"], Cell::Number(1.0));
        assert_eq!(dataset.rows()[1]["label"], Cell::text("b"));
    }
}
