//! Feature Table Assembly
//!
//! Derives rolling, lag, trend and EWMA features per engine run, adds the
//! capped RUL target and optionally scales the result.

use crate::scaler::{FittedScaler, ScalingMethod};
use crate::windows::{diff, ewma, lag, rolling, rolling_slope};
use crate::FeatureError;
use sensor_table::{Column, ColumnKind, EngineRun, Table, Transform, RUL, RUL_CLIPPED};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Feature engineering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Rolling statistic window sizes
    #[serde(deserialize_with = "one_or_many")]
    pub windows: Vec<usize>,
    /// Lag offsets in cycles
    #[serde(deserialize_with = "one_or_many")]
    pub lags: Vec<usize>,
    /// EWMA spans
    #[serde(deserialize_with = "one_or_many")]
    pub ewma_spans: Vec<usize>,
    /// Window for the rolling slope
    pub trend_window: usize,
    /// Cap applied to the auxiliary RUL target
    pub rul_clip: f64,
    /// Scale sensors and derived features
    pub normalize: bool,
    /// Scaling method used when `normalize` is set
    pub scaling: ScalingMethod,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            windows: vec![5, 10, 20],
            lags: vec![1, 3, 5],
            ewma_spans: vec![5, 10, 20],
            trend_window: 10,
            rul_clip: 125.0,
            normalize: true,
            scaling: ScalingMethod::MinMax,
        }
    }
}

impl FeatureConfig {
    /// Reject non-positive window, lag and span values
    pub fn validate(&self) -> Result<(), FeatureError> {
        for (field, values) in [
            ("windows", &self.windows),
            ("lags", &self.lags),
            ("ewma_spans", &self.ewma_spans),
        ] {
            if values.contains(&0) {
                return Err(FeatureError::Config(format!(
                    "{field} must be positive, got {values:?}"
                )));
            }
        }
        if self.trend_window == 0 {
            return Err(FeatureError::Config("trend_window must be positive".into()));
        }
        if !self.rul_clip.is_finite() || self.rul_clip < 0.0 {
            return Err(FeatureError::Config(format!(
                "rul_clip must be a non-negative number, got {}",
                self.rul_clip
            )));
        }
        Ok(())
    }

    /// Number of derived columns produced per sensor
    pub fn features_per_sensor(&self) -> usize {
        self.windows.len() * 4 + self.lags.len() + 2 + self.ewma_spans.len()
    }
}

/// Accept either a list of sizes or a single size. Environment overrides
/// with one value arrive as a scalar.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SizesVisitor;

    impl<'de> Visitor<'de> for SizesVisitor {
        type Value = Vec<usize>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a list of them")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            usize::try_from(v)
                .map(|v| vec![v])
                .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            usize::try_from(v)
                .map(|v| vec![v])
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(v) = seq.next_element()? {
                out.push(v);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(SizesVisitor)
}

/// Output of a fit pass
#[derive(Debug, Clone)]
pub struct Engineered {
    pub table: Table,
    /// Bounds fitted on this table, present when normalization is enabled
    pub scaler: Option<FittedScaler>,
}

/// Feature engineer for cleaned tables
#[derive(Debug, Clone)]
pub struct FeatureEngineer {
    config: FeatureConfig,
}

impl FeatureEngineer {
    /// Create an engineer, validating the configuration up front
    pub fn new(config: FeatureConfig) -> Result<Self, FeatureError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Derive features and, when enabled, fit a scaler on the result
    pub fn engineer(&self, table: Table) -> Result<Engineered, FeatureError> {
        let table = self.derive(table)?;
        if !self.config.normalize {
            return Ok(Engineered {
                table,
                scaler: None,
            });
        }

        let scaler = FittedScaler::fit(&table, self.config.scaling)?;
        let table = scaler.transform(table)?;
        info!(
            "Normalized {} features (fitted scaler)",
            scaler.columns().len()
        );
        Ok(Engineered {
            table,
            scaler: Some(scaler),
        })
    }

    /// Derive features and scale them with previously fitted bounds
    pub fn engineer_with(
        &self,
        table: Table,
        scaler: &FittedScaler,
    ) -> Result<Table, FeatureError> {
        let table = scaler.transform(self.derive(table)?)?;
        info!(
            "Normalized {} features (using existing scaler)",
            scaler.columns().len()
        );
        Ok(table)
    }

    /// Add every derived column and the capped target, without scaling
    pub fn derive(&self, mut table: Table) -> Result<Table, FeatureError> {
        let runs = table.engine_runs()?;
        let sensors = table.sensor_names();
        let before = table.num_columns();

        self.add_rolling(&mut table, &runs, &sensors)?;
        self.add_lags(&mut table, &runs, &sensors)?;
        self.add_trends(&mut table, &runs, &sensors)?;
        self.add_ewma(&mut table, &runs, &sensors)?;
        self.clip_rul(&mut table)?;

        info!(
            "Derived {} feature columns from {} sensors over {} engines",
            table.num_columns() - before,
            sensors.len(),
            runs.len()
        );
        Ok(table)
    }

    fn add_rolling(
        &self,
        table: &mut Table,
        runs: &[EngineRun],
        sensors: &[String],
    ) -> Result<(), FeatureError> {
        debug!("Generating rolling features for windows: {:?}", self.config.windows);
        for &window in &self.config.windows {
            for sensor in sensors {
                let values = table.values(sensor)?;
                let mut mean = vec![0.0; table.num_rows()];
                let mut std_dev = vec![0.0; table.num_rows()];
                let mut min = vec![0.0; table.num_rows()];
                let mut max = vec![0.0; table.num_rows()];
                for run in runs {
                    let series = rolling(&run.gather(values), window);
                    run.scatter(&series.mean, &mut mean);
                    run.scatter(&series.std_dev, &mut std_dev);
                    run.scatter(&series.min, &mut min);
                    run.scatter(&series.max, &mut max);
                }
                push_derived(table, sensor, Transform::RollingMean(window), mean)?;
                push_derived(table, sensor, Transform::RollingStd(window), std_dev)?;
                push_derived(table, sensor, Transform::RollingMin(window), min)?;
                push_derived(table, sensor, Transform::RollingMax(window), max)?;
            }
        }
        Ok(())
    }

    fn add_lags(
        &self,
        table: &mut Table,
        runs: &[EngineRun],
        sensors: &[String],
    ) -> Result<(), FeatureError> {
        debug!("Generating lag features for lags: {:?}", self.config.lags);
        for &k in &self.config.lags {
            for run in runs.iter().filter(|r| r.len() <= k) {
                warn!(
                    "Engine {} has {} cycles, lag {} falls back to its first reading",
                    run.engine_id,
                    run.len(),
                    k
                );
            }
            for sensor in sensors {
                let values = table.map_runs(runs, sensor, |xs| lag(xs, k))?;
                push_derived(table, sensor, Transform::Lag(k), values)?;
            }
        }
        Ok(())
    }

    fn add_trends(
        &self,
        table: &mut Table,
        runs: &[EngineRun],
        sensors: &[String],
    ) -> Result<(), FeatureError> {
        let window = self.config.trend_window;
        debug!("Generating trend features with window={}", window);
        for sensor in sensors {
            let diffs = table.map_runs(runs, sensor, diff)?;
            push_derived(table, sensor, Transform::Diff, diffs)?;
            let slopes = table.map_runs(runs, sensor, |xs| rolling_slope(xs, window))?;
            push_derived(table, sensor, Transform::Slope(window), slopes)?;
        }
        Ok(())
    }

    fn add_ewma(
        &self,
        table: &mut Table,
        runs: &[EngineRun],
        sensors: &[String],
    ) -> Result<(), FeatureError> {
        debug!("Generating EWMA features for spans: {:?}", self.config.ewma_spans);
        for &span in &self.config.ewma_spans {
            for sensor in sensors {
                let values = table.map_runs(runs, sensor, |xs| ewma(xs, span))?;
                push_derived(table, sensor, Transform::Ewma(span), values)?;
            }
        }
        Ok(())
    }

    fn clip_rul(&self, table: &mut Table) -> Result<(), FeatureError> {
        let Some(rul) = table.column(RUL) else {
            debug!("No {} column, skipping clip", RUL);
            return Ok(());
        };
        let clip = self.config.rul_clip;
        let clipped = rul
            .values
            .iter()
            .map(|&v| if v > clip { clip } else { v })
            .collect();
        table.push_column(Column::new(RUL_CLIPPED, ColumnKind::Target, clipped))?;
        Ok(())
    }
}

/// One-shot fit pass returning only the engineered table
pub fn engineer(table: Table, config: &FeatureConfig) -> Result<Table, FeatureError> {
    Ok(FeatureEngineer::new(config.clone())?.engineer(table)?.table)
}

fn push_derived(
    table: &mut Table,
    sensor: &str,
    transform: Transform,
    values: Vec<f64>,
) -> Result<(), FeatureError> {
    let column = Column::new(
        transform.column_name(sensor),
        ColumnKind::Derived {
            source: sensor.to_string(),
            transform,
        },
        values,
    );
    table.push_column(column)?;
    Ok(())
}
