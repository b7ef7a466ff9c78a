//! CLI entry point for the tabular data preparation pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tabula_processing::{
    CategoryAggregate, ColumnProfile, DataProfiler, Dataset, DatasetSummary, HistogramBin,
    SampleKind, TaskType, aggregate, loader, prepare, samples,
};
use tracing::info;

/// CLI-compatible sample dataset enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSample {
    /// Iris-style flower measurements (classification)
    Iris,
    /// Housing prices (regression)
    Housing,
    /// Customer segmentation (classification)
    Customer,
}

impl From<CliSample> for SampleKind {
    fn from(cli: CliSample) -> Self {
        match cli {
            CliSample::Iris => SampleKind::Iris,
            CliSample::Housing => SampleKind::Housing,
            CliSample::Customer => SampleKind::Customer,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Tabular data preparation and summary statistics",
    long_about = "Profiles a tabular dataset and optionally prepares it for a training run.\n\n\
                  EXAMPLES:\n  \
                  # Profile a CSV file\n  \
                  tabula -i data.csv\n\n  \
                  # Prepare a train/test split for a target column\n  \
                  tabula -i data.csv --target price --split 80\n\n  \
                  # Histogram of one column, JSON output\n  \
                  tabula -i data.csv --histogram age --bins 10 --json\n\n  \
                  # Work on a built-in sample dataset\n  \
                  tabula --sample iris --target species"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long, conflicts_with = "sample")]
    input: Option<String>,

    /// Use a built-in sample dataset instead of a file
    #[arg(long, value_enum)]
    sample: Option<CliSample>,

    /// Target column for train/test preparation
    #[arg(short, long)]
    target: Option<String>,

    /// Feature columns (comma separated)
    ///
    /// Defaults to every column except the target.
    #[arg(short, long, value_delimiter = ',')]
    features: Vec<String>,

    /// Train split as a percentage (0-100)
    #[arg(long, default_value = "80")]
    split: u8,

    /// Column to bin into a histogram
    #[arg(long)]
    histogram: Option<String>,

    /// Number of histogram bins
    #[arg(long, default_value = "10")]
    bins: usize,

    /// Categorical key column for group-by means
    #[arg(long, requires = "group_value")]
    group_key: Option<String>,

    /// Numeric value column for group-by means
    #[arg(long, requires = "group_key")]
    group_value: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of a human-readable summary
    #[arg(long)]
    json: bool,
}

/// Everything one invocation produced, for JSON output.
#[derive(Debug, Serialize)]
struct Report {
    summary: DatasetSummary,
    columns: Vec<ColumnProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prepared: Option<PreparedSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    histogram: Option<Vec<HistogramBin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_means: Option<Vec<CategoryAggregate>>,
}

#[derive(Debug, Serialize)]
struct PreparedSummary {
    target: String,
    features: Vec<String>,
    task_type: TaskType,
    train_rows: usize,
    test_rows: usize,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_dataset(args: &Args) -> Result<Dataset> {
    if let Some(sample) = args.sample {
        info!(sample = ?sample, "generating sample dataset");
        return Ok(samples::generate(sample.into()));
    }
    let input = args
        .input
        .as_ref()
        .ok_or_else(|| anyhow!("either --input or --sample is required"))?;
    Ok(loader::read_dataset(input)?)
}

fn run(args: &Args) -> Result<Report> {
    let dataset = load_dataset(args)?;

    let summary = DataProfiler::summarize(&dataset);
    let columns = DataProfiler::profile_columns(&dataset);

    let prepared = match &args.target {
        Some(target) => {
            if args.split > 100 {
                return Err(anyhow!("--split must be between 0 and 100"));
            }
            let features: Vec<String> = if args.features.is_empty() {
                dataset
                    .columns()
                    .iter()
                    .filter(|c| *c != target)
                    .cloned()
                    .collect()
            } else {
                args.features.clone()
            };
            let ratio = f64::from(args.split) / 100.0;
            let set = prepare::prepare(&dataset, target, &features, ratio)?;
            Some(PreparedSummary {
                target: set.target.clone(),
                features: set.features.clone(),
                task_type: set.task_type,
                train_rows: set.train_rows.len(),
                test_rows: set.test_rows.len(),
            })
        }
        None => None,
    };

    let histogram = match &args.histogram {
        Some(column) => Some(aggregate::histogram_for_column(
            &dataset, column, args.bins,
        )?),
        None => None,
    };

    let category_means = match (&args.group_key, &args.group_value) {
        (Some(key), Some(value)) => Some(aggregate::category_means(&dataset, key, value)?),
        _ => None,
    };

    Ok(Report {
        summary,
        columns,
        prepared,
        histogram,
        category_means,
    })
}

fn print_human(report: &Report) {
    let s = &report.summary;
    println!(
        "{} rows x {} columns ({} numerical, {} categorical), {} missing values",
        s.row_count, s.column_count, s.numerical_columns, s.categorical_columns, s.total_missing
    );

    for col in &report.columns {
        let kind = if col.is_numerical {
            "numerical"
        } else {
            "categorical"
        };
        println!("  {:<24} {:<12} missing: {}", col.name, kind, col.missing_count);
    }

    if let Some(prepared) = &report.prepared {
        println!(
            "\nprepared '{}' ({}) with {} features: {} train / {} test",
            prepared.target,
            prepared.task_type,
            prepared.features.len(),
            prepared.train_rows,
            prepared.test_rows
        );
    }

    if let Some(bins) = &report.histogram {
        println!();
        for bin in bins {
            println!("  [{}] {}", bin.label(), bin.count);
        }
    }

    if let Some(means) = &report.category_means {
        println!();
        for agg in means {
            println!("  {:<24} mean: {:.3}", agg.key, agg.mean);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let report = run(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report);
    }

    Ok(())
}
