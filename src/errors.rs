use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised while synthesising or reading a dataset.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid value range: base {0} is not finite")]
    InvalidRange(f64),

    #[error("Malformed dataset at line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}

/// Errors raised by the benchmark driver.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to start workload {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workload {path} failed with {status}")]
    WorkloadFailed { path: PathBuf, status: ExitStatus },

    #[error("Dataset error: {0}")]
    Dataset(#[from] GenError),

    #[error("Series length mismatch: {plan} executions vs {series} timings")]
    LengthMismatch { plan: usize, series: usize },

    #[error("Plot error: {0}")]
    Plot(String),
}
