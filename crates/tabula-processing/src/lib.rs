//! Tabular Data Preparation Library
//!
//! The data-shaping core behind a mock machine-learning workbench:
//! ingestion normalization, column profiling, feature/target extraction
//! with a randomized train/test split, task-type detection, and the
//! category/histogram aggregations that feed summary charts.
//!
//! # Overview
//!
//! - **Ingestion**: raw parser records → clean, immutable [`Dataset`]
//! - **Profiling**: numeric/categorical classification and missing counts
//! - **Preparation**: completeness filtering, numeric coercion, uniform
//!   shuffle and exact `floor(r·n)` split into a [`PreparedSet`]
//! - **Aggregation**: per-category means and fixed-width histogram bins
//! - **Loading**: polars-backed CSV decoding into raw records
//! - **Samples**: built-in synthetic datasets for demos and tests
//!
//! Everything is synchronous and pure over in-memory data: each call
//! builds fresh values instead of mutating shared state, so no locking or
//! cancellation is needed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabula_processing::{loader, prepare, profiler::DataProfiler};
//!
//! let dataset = loader::read_dataset("data.csv")?;
//! let summary = DataProfiler::summarize(&dataset);
//! println!("{} rows, {} numerical columns", summary.row_count, summary.numerical_columns);
//!
//! let prepared = prepare::prepare(
//!     &dataset,
//!     "price",
//!     &["rooms".to_string(), "age".to_string()],
//!     0.8,
//! )?;
//! println!("task: {}, train: {}", prepared.task_type, prepared.train_rows.len());
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PrepError>`](PrepError) with
//! a typed taxonomy (`NO_VALID_DATA`, `NO_FEATURES_SELECTED`,
//! `EMPTY_AFTER_FILTERING`, `INVALID_SPLIT_RATIO`, `INVALID_BIN_COUNT`,
//! ...). Errors serialize as `{code, message}` for frontend handling and
//! never leave partially-built datasets behind.

pub mod aggregate;
pub mod error;
pub mod ingest;
pub mod loader;
pub mod prepare;
pub mod profiler;
pub mod samples;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregate::{category_means, histogram, histogram_for_column};
pub use error::{PrepError, Result as PrepResult, ResultExt};
pub use ingest::{RawRecord, normalize};
pub use prepare::{detect_task_type, prepare, prepare_with_rng, split_rows};
pub use profiler::DataProfiler;
pub use samples::SampleKind;
pub use types::{
    CategoryAggregate, Cell, ColumnProfile, Dataset, DatasetSummary, HistogramBin, PreparedSet,
    Row, TaskType,
};
