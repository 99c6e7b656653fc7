//! CMAPSS Dataset Loader
//!
//! Reads the whitespace-delimited turbofan degradation logs, one row per
//! (engine unit, cycle), and labels every row with its Remaining Useful Life.

mod error;
mod loader;
mod parser;
mod rul;

pub use error::LoaderError;
pub use loader::{CmapssLoader, DEFAULT_DATA_DIR};
pub use parser::{
    parse_readings, parse_truth, schema_columns, SCHEMA_WIDTH, SENSOR_COUNT, SETTING_COUNT,
};
pub use rul::{label_test, label_train};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Predefined CMAPSS dataset variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetVariant {
    FD001,
    FD002,
    FD003,
    FD004,
}

impl DatasetVariant {
    pub const ALL: [DatasetVariant; 4] = [Self::FD001, Self::FD002, Self::FD003, Self::FD004];

    /// Number of distinct operating conditions in the variant
    pub fn operating_conditions(&self) -> u8 {
        match self {
            Self::FD001 | Self::FD003 => 1,
            Self::FD002 | Self::FD004 => 6,
        }
    }

    /// Number of fault modes present in the variant
    pub fn fault_modes(&self) -> u8 {
        match self {
            Self::FD001 | Self::FD002 => 1,
            Self::FD003 | Self::FD004 => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FD001 => "FD001",
            Self::FD002 => "FD002",
            Self::FD003 => "FD003",
            Self::FD004 => "FD004",
        }
    }
}

impl fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetVariant {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LoaderError::UnknownName {
                kind: "dataset",
                value: s.to_string(),
            })
    }
}

/// Dataset split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Run-to-failure trajectories
    Train,
    /// Truncated trajectories with externally supplied truth
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => f.write_str("train"),
            Self::Test => f.write_str("test"),
        }
    }
}

impl FromStr for Split {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "train" => Ok(Self::Train),
            "test" => Ok(Self::Test),
            _ => Err(LoaderError::UnknownName {
                kind: "split",
                value: s.to_string(),
            }),
        }
    }
}
