//! Feature Scaling with Explicit Fitted Bounds
//!
//! `FittedScaler::fit` learns per-column bounds once; `transform` reuses
//! them unchanged, so an evaluation split is scaled with training statistics.

use crate::FeatureError;
use serde::{Deserialize, Serialize};
use sensor_table::{ColumnKind, Table, TableError};
use tracing::debug;

/// Scaling method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMethod {
    /// Min-max scaling to [0, 1]
    #[default]
    MinMax,
    /// Zero mean, unit variance
    Standard,
}

/// Bounds learned for one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ColumnScale {
    MinMax { min: f64, max: f64 },
    Standard { mean: f64, std_dev: f64 },
}

impl ColumnScale {
    fn fit(method: ScalingMethod, values: &[f64]) -> Self {
        let finite: Vec<f64> = values.iter().cloned().filter(|v| v.is_finite()).collect();
        match method {
            ScalingMethod::MinMax => {
                if finite.is_empty() {
                    return Self::MinMax { min: 0.0, max: 0.0 };
                }
                Self::MinMax {
                    min: finite.iter().cloned().fold(f64::MAX, f64::min),
                    max: finite.iter().cloned().fold(f64::MIN, f64::max),
                }
            }
            ScalingMethod::Standard => {
                if finite.is_empty() {
                    return Self::Standard { mean: 0.0, std_dev: 0.0 };
                }
                let n = finite.len() as f64;
                let mean = finite.iter().sum::<f64>() / n;
                let variance = finite.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
                Self::Standard {
                    mean,
                    std_dev: variance.sqrt(),
                }
            }
        }
    }

    /// Scale one value. A zero-width range or zero std divides by 1, so
    /// only the offset is removed; NaN stays NaN.
    pub fn apply(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        let (offset, scale) = match *self {
            Self::MinMax { min, max } => (min, max - min),
            Self::Standard { mean, std_dev } => (mean, std_dev),
        };
        let scale = if scale == 0.0 { 1.0 } else { scale };
        (value - offset) / scale
    }
}

/// Bounds for one named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledColumn {
    pub name: String,
    pub scale: ColumnScale,
}

/// Immutable per-column bounds produced by a fit pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedScaler {
    method: ScalingMethod,
    columns: Vec<ScaledColumn>,
}

impl FittedScaler {
    /// Fit every sensor and derived feature column of `table`
    pub fn fit(table: &Table, method: ScalingMethod) -> Result<Self, FeatureError> {
        let names = table.names_where(ColumnKind::is_feature);
        Self::fit_columns(table, &names, method)
    }

    /// Fit the named columns
    pub fn fit_columns<S: AsRef<str>>(
        table: &Table,
        names: &[S],
        method: ScalingMethod,
    ) -> Result<Self, FeatureError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            columns.push(ScaledColumn {
                name: name.to_string(),
                scale: ColumnScale::fit(method, table.values(name)?),
            });
        }
        debug!("Fitted {:?} scaler on {} columns", method, columns.len());
        Ok(Self { method, columns })
    }

    pub fn method(&self) -> ScalingMethod {
        self.method
    }

    pub fn columns(&self) -> &[ScaledColumn] {
        &self.columns
    }

    /// Bounds of one column, if it was fitted
    pub fn scale_of(&self, name: &str) -> Option<&ColumnScale> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.scale)
    }

    /// Scale every fitted column of `table` with the stored bounds. Every
    /// fitted column must be present.
    pub fn transform(&self, mut table: Table) -> Result<Table, FeatureError> {
        if let Some(missing) = self.columns.iter().find(|c| !table.contains(&c.name)) {
            return Err(TableError::MissingColumn(missing.name.clone()).into());
        }
        for column in &self.columns {
            for v in table.values_mut(&column.name)? {
                *v = column.scale.apply(*v);
            }
        }
        Ok(table)
    }
}
