//! Core data model: cells, rows, datasets and the derived summary types.
//!
//! A [`Dataset`] is an immutable in-memory table created once per ingested
//! file (or generated sample). Profiles, prepared sets and aggregates are
//! derived from it on demand and never mutate it in place.

use crate::error::{PrepError, Result};
use crate::utils::parse_numeric;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single scalar value in a table.
///
/// `Missing` is distinct from `Text("")`: the former means the source had
/// no value at all (null or absent key), the latter an explicit empty
/// string. Most pipeline stages treat both as absent via [`Cell::is_blank`].
///
/// Serializes untagged, so JSON round-trips as number / string / null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// True only for the explicit `Missing` variant.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// True for `Missing` and for empty text — the values the original
    /// source treats as "no value" when filtering and counting.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Numeric interpretation: a native number, or text that parses
    /// (trimmed) as a finite number.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => parse_numeric(s),
            _ => None,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Missing => Ok(()),
        }
    }
}

/// One table row: column name to cell. After normalization every row of a
/// dataset carries exactly the dataset's column set.
pub type Row = HashMap<String, Cell>;

/// Immutable in-memory table of rows sharing one column schema.
///
/// Construction goes through [`crate::ingest::normalize`] (or the sample
/// generators), which guarantees the dataset is non-empty and every row has
/// the full column set. There are no mutating accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Column names in source order (taken from the first ingested record).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// All cells of one column, in row order.
    ///
    /// Returns `ColumnNotFound` for names outside the schema.
    pub fn column(&self, name: &str) -> Result<Vec<&Cell>> {
        if !self.has_column(name) {
            return Err(PrepError::ColumnNotFound(name.to_string()));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(name).unwrap_or(&Cell::Missing))
            .collect())
    }
}

/// Per-column profile, recomputed on demand from a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    /// A column is numerical iff it has at least one non-blank value and
    /// every non-blank value parses as a finite number. Columns with zero
    /// non-blank values are categorical by convention.
    pub is_numerical: bool,
    /// Rows where this column's cell is missing, empty or absent.
    pub missing_count: usize,
}

/// Preview statistics over a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub numerical_columns: usize,
    pub categorical_columns: usize,
    /// Blank cells summed across all columns.
    pub total_missing: usize,
}

/// Regression (continuous numeric target) vs classification
/// (discrete-label target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Regression,
    Classification,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Regression => write!(f, "regression"),
            TaskType::Classification => write!(f, "classification"),
        }
    }
}

/// The feature/target-extracted, shuffled and split view of a dataset used
/// for a single training run. Discarded and rebuilt on every new run.
///
/// Invariant: `train_rows` and `test_rows` partition the rows that passed
/// the completeness filter; `features` never contains `target`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedSet {
    pub features: Vec<String>,
    pub target: String,
    pub train_rows: Vec<Row>,
    pub test_rows: Vec<Row>,
    pub task_type: TaskType,
}

impl PreparedSet {
    /// Total rows that survived the completeness filter.
    pub fn filtered_len(&self) -> usize {
        self.train_rows.len() + self.test_rows.len()
    }
}

/// One fixed-width interval over a numeric column's observed range.
///
/// Half-open `[lower, upper)`, except the last bin of a histogram which is
/// closed on both ends so the maximum is counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    /// Axis label in the `"1.0-1.9"` form the charting layer displays.
    pub fn label(&self) -> String {
        format!("{:.1}-{:.1}", self.lower, self.upper)
    }
}

/// Per-key mean reduction used for categorical-vs-numeric summary charts.
/// Sequences of these preserve first-seen key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub key: String,
    pub mean: f64,
}
