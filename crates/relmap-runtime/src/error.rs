//! Error types for loading researcher data.
//!
//! Scoring and filtering never fail; only reading a data source can.

use thiserror::Error;

/// Errors raised while loading a record set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported data format: {0} (expected .csv, .tsv or .json)")]
    UnsupportedFormat(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
