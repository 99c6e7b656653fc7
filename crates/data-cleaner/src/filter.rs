//! Variance and Correlation Sensor Filter

use crate::statistics::{pearson, sample_variance};
use crate::CleanError;
use serde::{Deserialize, Serialize};
use sensor_table::Table;
use std::collections::BTreeSet;
use tracing::debug;

/// Sensor retention thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Absolute correlation above which the later sensor of a pair is redundant
    pub corr_threshold: f64,
    /// Minimum variance a sensor must have
    pub variance_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            corr_threshold: 0.95,
            variance_threshold: 1e-3,
        }
    }
}

impl FilterConfig {
    /// Check threshold ranges
    pub fn validate(&self) -> Result<(), CleanError> {
        if !(0.0..=1.0).contains(&self.corr_threshold) {
            return Err(CleanError::Config {
                field: "corr_threshold",
                value: self.corr_threshold,
                allowed: "[0, 1]",
            });
        }
        if !self.variance_threshold.is_finite() || self.variance_threshold < 0.0 {
            return Err(CleanError::Config {
                field: "variance_threshold",
                value: self.variance_threshold,
                allowed: "[0, inf)",
            });
        }
        Ok(())
    }
}

/// Removes near-constant and mutually redundant sensors
#[derive(Debug, Clone)]
pub struct SensorFilter {
    config: FilterConfig,
}

impl SensorFilter {
    /// Create a filter, rejecting out-of-range thresholds
    pub fn new(config: FilterConfig) -> Result<Self, CleanError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Drop low-variance sensors and the later sensor of every highly
    /// correlated pair. Both sets are computed on the input table.
    pub fn filter(&self, table: &Table) -> Result<(Table, BTreeSet<String>), CleanError> {
        let mut dropped: BTreeSet<String> = self.low_variance(table)?.into_iter().collect();
        dropped.extend(self.correlated(table)?);
        debug!("Sensor filter dropping {} columns: {:?}", dropped.len(), dropped);

        let names: Vec<&String> = dropped.iter().collect();
        Ok((table.clone().drop_columns(&names), dropped))
    }

    /// Sensors whose variance is below the threshold, or undefined
    pub fn low_variance(&self, table: &Table) -> Result<Vec<String>, CleanError> {
        let threshold = self.config.variance_threshold;
        sensors_by_variance(table, |var| var.is_nan() || var < threshold)
    }

    /// Later sensor of each pair with absolute correlation strictly above
    /// the threshold
    pub fn correlated(&self, table: &Table) -> Result<Vec<String>, CleanError> {
        let sensors = table.sensor_names();
        let mut columns = Vec::with_capacity(sensors.len());
        for name in &sensors {
            columns.push(table.values(name)?);
        }

        let mut dropped = Vec::new();
        for j in 1..columns.len() {
            let redundant = (0..j).any(|i| {
                let r = pearson(columns[i], columns[j]).abs();
                r > self.config.corr_threshold
            });
            if redundant {
                dropped.push(sensors[j].clone());
            }
        }
        Ok(dropped)
    }
}

impl Default for SensorFilter {
    fn default() -> Self {
        Self {
            config: FilterConfig::default(),
        }
    }
}

/// Sensors with variance exactly zero
pub fn constant_sensors(table: &Table) -> Result<Vec<String>, CleanError> {
    sensors_by_variance(table, |var| var == 0.0)
}

fn sensors_by_variance(
    table: &Table,
    drop: impl Fn(f64) -> bool,
) -> Result<Vec<String>, CleanError> {
    let mut out = Vec::new();
    for name in table.sensor_names() {
        let var = sample_variance(table.values(&name)?);
        if drop(var) {
            out.push(name);
        }
    }
    Ok(out)
}
