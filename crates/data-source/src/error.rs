use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error while reading data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("File '{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid row {row} in '{path}': {reason}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("Row {row} in '{path}' is not after the previous row ({current} <= {previous})")]
    Unordered {
        path: PathBuf,
        row: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    #[error("File '{0}' contains no data rows")]
    Empty(PathBuf),

    #[error("The requested data file '{0}' was not found.")]
    NotFound(String),

    #[error("'{0}' is not a plain file name inside the data directory")]
    InvalidPath(String),
}
