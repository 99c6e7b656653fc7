//! CSV and JSON output for pipeline tiers

use crate::PipelineError;
use sensor_table::Table;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `table` as comma-separated values with a header row.
///
/// Returns the number of data rows written.
pub fn write_table<W: Write>(
    table: &Table,
    writer: W,
    path: &Path,
) -> Result<usize, PipelineError> {
    let csv_error = |source| PipelineError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(table.column_names()).map_err(csv_error)?;

    let mut record = Vec::with_capacity(table.num_columns());
    for row in 0..table.num_rows() {
        record.clear();
        record.extend(table.columns().iter().map(|c| c.values[row].to_string()));
        csv_writer.write_record(&record).map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(table.num_rows())
}

/// Write `table` to a CSV file, creating parent directories
pub fn write_csv(table: &Table, path: &Path) -> Result<usize, PipelineError> {
    let file = create(path)?;
    write_table(table, file, path)
}

/// Write `value` as pretty-printed JSON, creating parent directories
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), PipelineError> {
    let file = create(path)?;
    serde_json::to_writer_pretty(file, value).map_err(|source| PipelineError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<fs::File, PipelineError> {
    let io_error = |source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::File::create(path).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_table::{Column, ColumnKind, ENGINE_ID, TIME_CYCLES};

    fn table() -> Table {
        Table::from_columns(vec![
            Column::new(ENGINE_ID, ColumnKind::EngineId, vec![1.0, 1.0]),
            Column::new(TIME_CYCLES, ColumnKind::Cycle, vec![1.0, 2.0]),
            Column::new("sensor_2", ColumnKind::Sensor, vec![641.82, 0.25]),
        ])
        .unwrap()
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut buf = Vec::new();
        let rows = write_table(&table(), &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(rows, 2);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "engine_id,time_cycles,sensor_2\n1,1,641.82\n1,2,0.25\n"
        );
    }

    #[test]
    fn test_write_csv_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silver").join("nested").join("t.csv");
        write_csv(&table(), &path).unwrap();
        assert!(path.exists());
    }
}
