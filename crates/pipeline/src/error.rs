//! Pipeline Error Types

use data_cleaner::CleanError;
use dataset_loader::LoaderError;
use feature_engine::FeatureError;
use sensor_table::TableError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from any pipeline stage
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),

    #[error(transparent)]
    Clean(#[from] CleanError),

    #[error(transparent)]
    Features(#[from] FeatureError),

    #[error(transparent)]
    Schema(#[from] TableError),

    /// Configuration file or environment override could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("CSV error writing {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error writing {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}
