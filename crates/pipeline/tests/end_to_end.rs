// End-to-end tests for the CMAPSS pipeline.
//
// These tests write raw readings to a temporary bronze directory and run the
// real loader, cleaner and feature engineer against them, then inspect the
// in-memory tables and the files written to the silver and gold tiers.

use data_cleaner::DropCategory;
use dataset_loader::{DatasetVariant, LoaderError};
use feature_engine::{ColumnScale, FeatureConfig, FittedScaler};
use pipeline::{process, run, PipelineConfig, PipelineError};
use sensor_table::{RUL, RUL_CLIPPED};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Two engines x five cycles. sensor_1 is constant, sensor_2 varies.
const TRAIN: &str = "\
1 1 -0.0007 -0.0004 100.0 518.67 1.0
1 2 -0.0007 -0.0004 100.0 518.67 2.0
1 3 -0.0007 -0.0004 100.0 518.67 4.0
1 4 -0.0007 -0.0004 100.0 518.67 7.0
1 5 -0.0007 -0.0004 100.0 518.67 11.0
2 1 -0.0007 -0.0004 100.0 518.67 10.0
2 2 -0.0007 -0.0004 100.0 518.67 9.0
2 3 -0.0007 -0.0004 100.0 518.67 8.0
2 4 -0.0007 -0.0004 100.0 518.67 7.0
2 5 -0.0007 -0.0004 100.0 518.67 6.0
";

const TEST: &str = "\
1 1 -0.0007 -0.0004 100.0 518.67 6.0
1 2 -0.0007 -0.0004 100.0 518.67 6.0
1 3 -0.0007 -0.0004 100.0 518.67 11.0
2 1 -0.0007 -0.0004 100.0 518.67 1.0
2 2 -0.0007 -0.0004 100.0 518.67 3.0
";

const TRUTH: &str = "112\n98\n";

const DERIVED: [&str; 8] = [
    "sensor_2_rolling_mean_2",
    "sensor_2_rolling_std_2",
    "sensor_2_rolling_min_2",
    "sensor_2_rolling_max_2",
    "sensor_2_lag_1",
    "sensor_2_diff",
    "sensor_2_slope_2",
    "sensor_2_ewma_2",
];

/// Bronze directory with train, test and truth files for FD001.
fn bronze() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("train_FD001.txt"), TRAIN).unwrap();
    fs::write(dir.path().join("test_FD001.txt"), TEST).unwrap();
    fs::write(dir.path().join("RUL_FD001.txt"), TRUTH).unwrap();
    dir
}

fn config(data_dir: &Path, out_dir: &Path, normalize: bool) -> PipelineConfig {
    PipelineConfig {
        dataset: DatasetVariant::FD001,
        data_dir: data_dir.to_path_buf(),
        features: FeatureConfig {
            windows: vec![2],
            lags: vec![1],
            ewma_spans: vec![2],
            trend_window: 2,
            normalize,
            ..Default::default()
        },
        include_test: true,
        ..Default::default()
    }
    .with_output_dir(out_dir)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// In-memory E2E
// =============================================================================

/// The constant sensor is reported under `constant` and nothing else is dropped.
#[test]
fn e2e_cleaning_drops_constant_sensor() {
    let data = bronze();
    let out = tempfile::tempdir().unwrap();
    let output = process(&config(data.path(), out.path(), false)).unwrap();

    assert_eq!(output.report.get(DropCategory::Constant), &["sensor_1".to_string()]);
    assert_eq!(output.report.total(), 1);
    assert!(!output.cleaned.contains("sensor_1"));
    assert_eq!(output.cleaned.sensor_names(), vec!["sensor_2".to_string()]);
    assert_eq!(output.cleaned.num_rows(), 10);
}

/// Derived columns are exactly the configured set, in order, after the base columns.
#[test]
fn e2e_feature_columns_and_values() {
    let data = bronze();
    let out = tempfile::tempdir().unwrap();
    let output = process(&config(data.path(), out.path(), false)).unwrap();
    let featured = &output.featured;

    let mut expected = vec![
        "engine_id",
        "time_cycles",
        "operational_setting_1",
        "operational_setting_2",
        "operational_setting_3",
        "sensor_2",
        RUL,
    ];
    expected.extend(DERIVED);
    expected.push(RUL_CLIPPED);
    assert_eq!(featured.column_names(), expected);
    assert!(output.scaler.is_none());

    // first two rows of engine 1: sensor_2 = 1, 2
    let first = |name: &str| featured.values(name).unwrap()[0];
    let second = |name: &str| featured.values(name).unwrap()[1];

    assert_close(first("sensor_2_rolling_mean_2"), 1.0);
    assert_close(second("sensor_2_rolling_mean_2"), 1.5);
    assert_close(first("sensor_2_rolling_std_2"), 0.0);
    assert_close(second("sensor_2_rolling_std_2"), 0.5f64.sqrt());
    assert_close(first("sensor_2_rolling_min_2"), 1.0);
    assert_close(second("sensor_2_rolling_min_2"), 1.0);
    assert_close(first("sensor_2_rolling_max_2"), 1.0);
    assert_close(second("sensor_2_rolling_max_2"), 2.0);
    assert_close(first("sensor_2_lag_1"), 1.0);
    assert_close(second("sensor_2_lag_1"), 1.0);
    assert_close(first("sensor_2_diff"), 0.0);
    assert_close(second("sensor_2_diff"), 1.0);
    assert_close(first("sensor_2_slope_2"), 0.0);
    assert_close(second("sensor_2_slope_2"), 1.0);
    assert_close(first("sensor_2_ewma_2"), 1.0);
    assert_close(second("sensor_2_ewma_2"), 5.0 / 3.0);

    // engine 2 starts fresh at row 5
    assert_close(featured.values("sensor_2_lag_1").unwrap()[5], 10.0);
    assert_close(featured.values("sensor_2_diff").unwrap()[5], 0.0);

    assert_eq!(
        featured.values(RUL).unwrap(),
        &[4.0, 3.0, 2.0, 1.0, 0.0, 4.0, 3.0, 2.0, 1.0, 0.0]
    );
}

/// The test split is scaled with bounds fitted on the training split.
#[test]
fn e2e_test_split_uses_training_scaler() {
    let data = bronze();
    let out = tempfile::tempdir().unwrap();
    let output = process(&config(data.path(), out.path(), true)).unwrap();

    let scaler = output.scaler.expect("normalize produces a scaler");
    assert_eq!(
        scaler.scale_of("sensor_2"),
        Some(&ColumnScale::MinMax { min: 1.0, max: 11.0 })
    );

    let test = output.test_featured.expect("include_test produces a test table");
    assert_eq!(test.column_names(), output.featured.column_names());
    assert_eq!(test.values("sensor_2").unwrap(), &[0.5, 0.5, 1.0, 0.0, 0.2]);
    // targets are never scaled; truth + (global max cycle - cycle)
    assert_eq!(test.values(RUL).unwrap(), &[114.0, 113.0, 112.0, 100.0, 99.0]);
    assert_eq!(test.values(RUL_CLIPPED).unwrap(), &[114.0, 113.0, 112.0, 100.0, 99.0]);
}

// =============================================================================
// Filesystem E2E
// =============================================================================

/// A full run writes every tier and the scaler artifact reloads with the same bounds.
#[test]
fn e2e_run_writes_all_tiers() {
    let data = bronze();
    let out = tempfile::tempdir().unwrap();
    let config = config(data.path(), out.path(), true);

    let written = run(&config).unwrap();
    assert_eq!(written.len(), 4);
    for path in &written {
        assert!(path.exists(), "missing output {}", path.display());
    }

    let cleaned = fs::read_to_string(config.cleaned_path()).unwrap();
    let mut lines = cleaned.lines();
    assert_eq!(
        lines.next(),
        Some("engine_id,time_cycles,operational_setting_1,operational_setting_2,operational_setting_3,sensor_2,RUL")
    );
    assert_eq!(lines.next(), Some("1,1,-0.0007,-0.0004,100,1,4"));
    assert_eq!(cleaned.lines().count(), 11);

    let featured = fs::read_to_string(config.featured_path()).unwrap();
    let header = featured.lines().next().unwrap();
    assert!(header.ends_with("sensor_2_ewma_2,RUL_clipped"), "header: {header}");

    let json = fs::read_to_string(config.scaler_path()).unwrap();
    let scaler: FittedScaler = serde_json::from_str(&json).unwrap();
    assert_eq!(
        scaler.scale_of("sensor_2"),
        Some(&ColumnScale::MinMax { min: 1.0, max: 11.0 })
    );

    let test = fs::read_to_string(config.test_featured_path()).unwrap();
    assert_eq!(test.lines().next(), Some(header));
    assert_eq!(test.lines().count(), 6);
}

/// A missing bronze file fails before any tier is written.
#[test]
fn e2e_missing_data_writes_nothing() {
    let empty = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let config = config(empty.path(), out.path(), true);

    let err = run(&config).unwrap_err();
    assert!(
        matches!(err, PipelineError::Load(LoaderError::DataNotFound { .. })),
        "unexpected error: {err}"
    );
    assert!(!config.silver_dir.exists());
    assert!(!config.gold_dir.exists());
}
