use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the job dashboard.
///
/// Parsing and aggregation never fail; these cover loading the dataset and
/// handling configuration.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or written.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// No dataset file exists at the given (or any discovered) location.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
