//! Loader Error Types

use sensor_table::TableError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a CMAPSS dataset
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Input or truth file absent
    #[error("Dataset not found: {}", path.display())]
    DataNotFound { path: PathBuf },

    /// Row width or value does not fit the fixed column schema
    #[error("Schema error at line {line}: {message}")]
    Schema { line: usize, message: String },

    /// Truth file does not line up with the engines in the readings
    #[error("Truth file has {actual} values, expected one per engine ({expected})")]
    TruthMismatch { expected: usize, actual: usize },

    /// Unknown dataset variant or split name
    #[error("Unknown {kind}: {value}")]
    UnknownName { kind: &'static str, value: String },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoaderError {
    pub(crate) fn schema(line: usize, message: impl Into<String>) -> Self {
        LoaderError::Schema {
            line,
            message: message.into(),
        }
    }
}
