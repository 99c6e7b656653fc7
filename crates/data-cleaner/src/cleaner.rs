//! Cleaning Orchestrator
//!
//! Invalid-value removal runs first so variance and correlation are never
//! computed over NaN or infinite values.

use crate::filter::{constant_sensors, FilterConfig, SensorFilter};
use crate::validator::invalid_columns;
use crate::CleanError;
use serde::{Deserialize, Serialize};
use sensor_table::Table;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Reason a column was removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropCategory {
    Invalid,
    Constant,
    LowVariance,
    Correlated,
}

impl DropCategory {
    /// Categories in the order they are applied
    pub const ORDER: [DropCategory; 4] = [
        Self::Invalid,
        Self::Constant,
        Self::LowVariance,
        Self::Correlated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Constant => "constant",
            Self::LowVariance => "low_variance",
            Self::Correlated => "correlated",
        }
    }
}

impl fmt::Display for DropCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns removed per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    dropped: BTreeMap<DropCategory, Vec<String>>,
}

impl Default for CleaningReport {
    fn default() -> Self {
        Self {
            dropped: DropCategory::ORDER.iter().map(|&c| (c, Vec::new())).collect(),
        }
    }
}

impl CleaningReport {
    /// Columns dropped under one category
    pub fn get(&self, category: DropCategory) -> &[String] {
        self.dropped.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of dropped columns
    pub fn total(&self) -> usize {
        self.dropped.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DropCategory, &[String])> {
        self.dropped.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// The report as a plain mapping
    pub fn into_map(self) -> BTreeMap<DropCategory, Vec<String>> {
        self.dropped
    }

    fn record(&mut self, category: DropCategory, columns: Vec<String>) {
        debug!("Dropping {} {} columns: {:?}", columns.len(), category, columns);
        self.dropped.insert(category, columns);
    }
}

/// Runs invalid, constant, low-variance and correlation removal in sequence
#[derive(Debug, Clone)]
pub struct Cleaner {
    filter: SensorFilter,
}

impl Cleaner {
    pub fn new(config: FilterConfig) -> Result<Self, CleanError> {
        Ok(Self {
            filter: SensorFilter::new(config)?,
        })
    }

    /// Clean a table. Each category is computed on the output of the
    /// previous one.
    pub fn clean(&self, table: Table) -> Result<(Table, CleaningReport), CleanError> {
        let before = table.num_columns();
        let mut report = CleaningReport::default();

        let invalid = invalid_columns(&table);
        let table = table.drop_columns(&invalid);
        report.record(DropCategory::Invalid, invalid);

        let constant = constant_sensors(&table)?;
        let table = table.drop_columns(&constant);
        report.record(DropCategory::Constant, constant);

        let low_variance = self.filter.low_variance(&table)?;
        let table = table.drop_columns(&low_variance);
        report.record(DropCategory::LowVariance, low_variance);

        let correlated = self.filter.correlated(&table)?;
        let table = table.drop_columns(&correlated);
        report.record(DropCategory::Correlated, correlated);

        info!(
            "Cleaned table: {} -> {} columns, {} sensors kept",
            before,
            table.num_columns(),
            table.sensor_names().len()
        );
        Ok((table, report))
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self {
            filter: SensorFilter::default(),
        }
    }
}
