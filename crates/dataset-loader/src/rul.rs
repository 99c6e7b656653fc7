//! Remaining Useful Life Labelling

use crate::LoaderError;
use sensor_table::{Column, ColumnKind, Table, RUL, TIME_CYCLES};

/// Label a run-to-failure table: `RUL = max(cycle in run) - cycle`
pub fn label_train(mut table: Table) -> Result<Table, LoaderError> {
    let runs = table.engine_runs()?;
    let rul = table.map_runs(&runs, TIME_CYCLES, |cycles| {
        let last = cycles.iter().cloned().fold(f64::MIN, f64::max);
        cycles.iter().map(|c| last - c).collect()
    })?;
    table.push_column(Column::new(RUL, ColumnKind::Target, rul))?;
    Ok(table)
}

/// Label a truncated table from per-engine truth values given in engine
/// appearance order: `RUL = truth + (max(cycle over table) - cycle)`
pub fn label_test(mut table: Table, truth: &[u32]) -> Result<Table, LoaderError> {
    let runs = table.engine_runs()?;
    if runs.len() != truth.len() {
        return Err(LoaderError::TruthMismatch {
            expected: runs.len(),
            actual: truth.len(),
        });
    }

    let cycles = table.values(TIME_CYCLES)?;
    let global_max = cycles.iter().cloned().fold(f64::MIN, f64::max);
    let mut rul = vec![0.0; table.num_rows()];
    for (run, &offset) in runs.iter().zip(truth) {
        let labels: Vec<f64> = run
            .gather(cycles)
            .iter()
            .map(|c| offset as f64 + (global_max - c))
            .collect();
        run.scatter(&labels, &mut rul);
    }

    table.push_column(Column::new(RUL, ColumnKind::Target, rul))?;
    Ok(table)
}
