//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while loading the event log
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read event log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Line {line}: cannot parse timestamp '{value}'")]
    InvalidTimestamp { line: u64, value: String },

    #[error("Line {line}: column '{column}' is empty")]
    EmptyField { line: u64, column: &'static str },
}

/// Errors raised when reshaping long-format rows into a pivot
#[derive(Error, Debug, PartialEq)]
pub enum PivotError {
    #[error("Duplicate pivot key ({day}, {page_type}); collapse duplicates first")]
    DuplicateKey { day: NaiveDate, page_type: String },
}

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Nothing to plot for chart '{0}'")]
    EmptySeries(String),

    #[error("Cannot reshape data for chart: {0}")]
    Pivot(#[from] PivotError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading the analytics config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
