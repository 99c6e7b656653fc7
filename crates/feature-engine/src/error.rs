//! Feature Engineering Error Types

use sensor_table::TableError;
use thiserror::Error;

/// Errors during feature derivation and scaling
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Invalid transform parameter
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Schema(#[from] TableError),
}
