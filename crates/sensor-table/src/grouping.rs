//! Per-Engine Grouping
//!
//! Splits a table into engine runs so windowed transforms operate on one
//! engine's readings at a time.

use crate::{Table, TableError, ENGINE_ID};
use std::collections::HashMap;

/// Rows belonging to one engine unit, in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRun {
    pub engine_id: u32,
    pub rows: Vec<usize>,
}

impl EngineRun {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Collect this run's values from a full-table column
    pub fn gather(&self, values: &[f64]) -> Vec<f64> {
        self.rows.iter().map(|&r| values[r]).collect()
    }

    /// Write per-run values back into a full-table column
    pub fn scatter(&self, run_values: &[f64], out: &mut [f64]) {
        for (&row, &value) in self.rows.iter().zip(run_values) {
            out[row] = value;
        }
    }
}

impl Table {
    /// Group rows by engine id, runs ordered by first appearance
    pub fn engine_runs(&self) -> Result<Vec<EngineRun>, TableError> {
        let ids = self.values(ENGINE_ID)?;
        let mut runs: Vec<EngineRun> = Vec::new();
        let mut index: HashMap<u32, usize> = HashMap::new();

        for (row, &raw) in ids.iter().enumerate() {
            let engine_id = engine_key(raw).ok_or(TableError::InvalidKey {
                column: ENGINE_ID,
                row,
                value: raw,
            })?;
            let slot = *index.entry(engine_id).or_insert_with(|| {
                runs.push(EngineRun {
                    engine_id,
                    rows: Vec::new(),
                });
                runs.len() - 1
            });
            runs[slot].rows.push(row);
        }

        Ok(runs)
    }

    /// Number of distinct engine units
    pub fn distinct_engines(&self) -> Result<usize, TableError> {
        Ok(self.engine_runs()?.len())
    }

    /// Apply `transform` to each engine's slice of `column` and reassemble a
    /// full-length column in table order.
    pub fn map_runs<F>(
        &self,
        runs: &[EngineRun],
        column: &str,
        mut transform: F,
    ) -> Result<Vec<f64>, TableError>
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        let values = self.values(column)?;
        let mut out = vec![f64::NAN; self.num_rows()];
        for run in runs {
            let slice = run.gather(values);
            run.scatter(&transform(&slice), &mut out);
        }
        Ok(out)
    }
}

fn engine_key(raw: f64) -> Option<u32> {
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= u32::MAX as f64 {
        Some(raw as u32)
    } else {
        None
    }
}
