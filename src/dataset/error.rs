//! Dataset loading error types

use std::path::PathBuf;
use thiserror::Error;

use super::schema::ColumnType;

/// Errors that abort a dataset load
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source file could not be opened or read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure itself is malformed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column required by the schema is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A cell could not be parsed as its declared type
    #[error("Line {line}: column '{column}' expected {expected}, found {value:?}")]
    TypeMismatch {
        line: u64,
        column: String,
        expected: ColumnType,
        value: String,
    },
}

/// Result type alias for dataset loading
pub type LoadResult<T> = Result<T, LoadError>;
