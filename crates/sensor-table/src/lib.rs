//! Sensor Table
//!
//! Column-oriented table shared by every pipeline stage. Columns carry an
//! explicit kind assigned at load time, so later stages select sensors and
//! derived features by type instead of by name.

mod grouping;
mod table;

pub use grouping::EngineRun;
pub use table::{Column, Table};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Engine unit identifier column
pub const ENGINE_ID: &str = "engine_id";
/// Time cycle column
pub const TIME_CYCLES: &str = "time_cycles";
/// Remaining useful life target column
pub const RUL: &str = "RUL";
/// Capped remaining useful life target column
pub const RUL_CLIPPED: &str = "RUL_clipped";

/// Windowed transform that produced a derived column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    RollingMean(usize),
    RollingStd(usize),
    RollingMin(usize),
    RollingMax(usize),
    Lag(usize),
    Diff,
    Slope(usize),
    Ewma(usize),
}

impl Transform {
    /// Name of the derived column for a given source sensor
    pub fn column_name(&self, source: &str) -> String {
        format!("{source}_{self}")
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RollingMean(w) => write!(f, "rolling_mean_{w}"),
            Self::RollingStd(w) => write!(f, "rolling_std_{w}"),
            Self::RollingMin(w) => write!(f, "rolling_min_{w}"),
            Self::RollingMax(w) => write!(f, "rolling_max_{w}"),
            Self::Lag(k) => write!(f, "lag_{k}"),
            Self::Diff => write!(f, "diff"),
            Self::Slope(w) => write!(f, "slope_{w}"),
            Self::Ewma(s) => write!(f, "ewma_{s}"),
        }
    }
}

/// Classification of a table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Engine unit key
    EngineId,
    /// Time cycle within a run
    Cycle,
    /// Operational setting
    Setting,
    /// Raw sensor measurement
    Sensor,
    /// Supervised-learning target (RUL and its variants)
    Target,
    /// Feature derived from a single sensor
    Derived { source: String, transform: Transform },
}

impl ColumnKind {
    /// Settings and sensors, i.e. columns read from the measurement file
    pub fn is_measurement(&self) -> bool {
        matches!(self, Self::Setting | Self::Sensor)
    }

    /// Sensors and derived features, i.e. columns subject to scaling
    pub fn is_feature(&self) -> bool {
        matches!(self, Self::Sensor | Self::Derived { .. })
    }

    pub fn is_sensor(&self) -> bool {
        matches!(self, Self::Sensor)
    }
}

/// Schema errors raised by table operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Column {name} has {actual} rows, table has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid {column} value {value} at row {row}")]
    InvalidKey {
        column: &'static str,
        row: usize,
        value: f64,
    },
}
