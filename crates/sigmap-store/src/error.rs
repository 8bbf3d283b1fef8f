//! Error types for sigmap-store.

use std::path::PathBuf;

/// Result type for sigmap-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sigmap-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to create the data directory.
    #[error("Failed to create data directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a snapshot file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a snapshot file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A snapshot file exists but does not parse.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Measurement id not present in the store.
    #[error("Measurement not found: {0}")]
    MeasurementNotFound(String),

    /// Floor id not present in the store.
    #[error("Floor not found: {0}")]
    FloorNotFound(i64),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timestamp formatting error during export.
    #[error("Timestamp format error: {0}")]
    TimestampFormat(#[from] time::error::Format),

    /// CSV encoding error during export.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
