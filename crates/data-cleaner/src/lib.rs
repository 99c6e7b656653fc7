//! Data Cleaning and Sensor Filtering
//!
//! Removes invalid, constant, low-variance and redundant sensor columns
//! before feature engineering.

mod cleaner;
mod error;
mod filter;
mod statistics;
mod validator;

pub use cleaner::{Cleaner, CleaningReport, DropCategory};
pub use error::CleanError;
pub use filter::{constant_sensors, FilterConfig, SensorFilter};
pub use statistics::{pearson, sample_variance};
pub use validator::invalid_columns;
