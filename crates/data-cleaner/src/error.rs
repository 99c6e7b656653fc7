//! Cleaning Error Types

use sensor_table::TableError;
use thiserror::Error;

/// Errors during sensor filtering and cleaning
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CleanError {
    /// Threshold outside its allowed range
    #[error("Configuration error: {field} = {value} is outside {allowed}")]
    Config {
        field: &'static str,
        value: f64,
        allowed: &'static str,
    },

    #[error(transparent)]
    Schema(#[from] TableError),
}
