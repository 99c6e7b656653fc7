//! Windowed Transforms over a Single Engine Run
//!
//! Every function takes one run's values in cycle order and returns a series
//! of the same length.

use crate::statistics::{slope, WindowStats};

/// Trailing rolling statistics for one window size
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingSeries {
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

/// Trailing window ending at `i`, at most `window` long, at least one sample
fn trailing(values: &[f64], i: usize, window: usize) -> &[f64] {
    let start = (i + 1).saturating_sub(window);
    &values[start..=i]
}

/// Rolling mean, std, min and max over the trailing `window` values
pub fn rolling(values: &[f64], window: usize) -> RollingSeries {
    let mut out = RollingSeries {
        mean: Vec::with_capacity(values.len()),
        std_dev: Vec::with_capacity(values.len()),
        min: Vec::with_capacity(values.len()),
        max: Vec::with_capacity(values.len()),
    };
    for i in 0..values.len() {
        let stats = WindowStats::compute(trailing(values, i, window));
        out.mean.push(stats.mean);
        out.std_dev.push(stats.std_dev);
        out.min.push(stats.min);
        out.max.push(stats.max);
    }
    out
}

/// Value `k` rows earlier; the first `k` rows take the run's first value
pub fn lag(values: &[f64], k: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| values[i.saturating_sub(k)])
        .collect()
}

/// First difference, 0 at the first row
pub fn diff(values: &[f64]) -> Vec<f64> {
    (0..values.len())
        .map(|i| if i == 0 { 0.0 } else { values[i] - values[i - 1] })
        .map(|d| if d.is_finite() { d } else { 0.0 })
        .collect()
}

/// Least-squares slope over the trailing `window` values
pub fn rolling_slope(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| slope(trailing(values, i, window)))
        .collect()
}

/// Non-adjusted exponentially weighted mean with `alpha = 2 / (span + 1)`
pub fn ewma(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}
