//! Feature Engineering Engine
//!
//! Derives per-engine rolling, lag, trend and EWMA features from a cleaned
//! sensor table and scales them with explicitly fitted bounds.

mod error;
mod features;
mod scaler;
mod statistics;
mod windows;

pub use error::FeatureError;
pub use features::{engineer, Engineered, FeatureConfig, FeatureEngineer};
pub use scaler::{ColumnScale, FittedScaler, ScaledColumn, ScalingMethod};
pub use statistics::{slope, WindowStats};
pub use windows::{diff, ewma, lag, rolling, rolling_slope, RollingSeries};
