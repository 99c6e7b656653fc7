//! Whitespace-Delimited Reading Parser

use crate::LoaderError;
use sensor_table::{Column, ColumnKind, Table, ENGINE_ID, TIME_CYCLES};
use std::io::BufRead;

/// Operational settings per reading
pub const SETTING_COUNT: usize = 3;
/// Maximum sensor channels per reading
pub const SENSOR_COUNT: usize = 26;
/// Full fixed schema width (id, cycle, settings, sensors)
pub const SCHEMA_WIDTH: usize = 2 + SETTING_COUNT + SENSOR_COUNT;

/// Column names and kinds of the fixed schema, in file order
pub fn schema_columns() -> Vec<(String, ColumnKind)> {
    let mut columns = vec![
        (ENGINE_ID.to_string(), ColumnKind::EngineId),
        (TIME_CYCLES.to_string(), ColumnKind::Cycle),
    ];
    columns.extend(
        (1..=SETTING_COUNT).map(|i| (format!("operational_setting_{i}"), ColumnKind::Setting)),
    );
    columns.extend((1..=SENSOR_COUNT).map(|i| (format!("sensor_{i}"), ColumnKind::Sensor)));
    columns
}

/// Parse raw readings. Every non-blank row must have the same width; columns
/// that are NaN in every row are dropped.
pub fn parse_readings<R: BufRead>(reader: R) -> Result<Table, LoaderError> {
    let mut width: Option<usize> = None;
    let mut data: Vec<Vec<f64>> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        match width {
            None => {
                if fields.len() < 2 || fields.len() > SCHEMA_WIDTH {
                    return Err(LoaderError::schema(
                        line_no,
                        format!("row has {} fields, expected 2..={}", fields.len(), SCHEMA_WIDTH),
                    ));
                }
                width = Some(fields.len());
                data = vec![Vec::new(); fields.len()];
            }
            Some(w) if w != fields.len() => {
                return Err(LoaderError::schema(
                    line_no,
                    format!("row has {} fields, previous rows have {}", fields.len(), w),
                ));
            }
            Some(_) => {}
        }

        for (column, field) in data.iter_mut().zip(&fields) {
            let value: f64 = field
                .parse()
                .map_err(|_| LoaderError::schema(line_no, format!("invalid number '{field}'")))?;
            column.push(value);
        }
    }

    if data.is_empty() {
        return Err(LoaderError::schema(0, "no readings"));
    }

    let mut table = Table::new();
    for ((name, kind), values) in schema_columns().into_iter().zip(data) {
        if values.iter().all(|v| v.is_nan()) {
            continue;
        }
        table.push_column(Column::new(name, kind, values))?;
    }
    Ok(table)
}

/// Parse a truth file: one non-negative integer per line
pub fn parse_truth<R: BufRead>(reader: R) -> Result<Vec<u32>, LoaderError> {
    let mut truth = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| LoaderError::schema(idx + 1, format!("invalid RUL value '{trimmed}'")))?;
        truth.push(value);
    }
    Ok(truth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_basic_rows() {
        let raw = "1 1 -0.0007 -0.0004 100.0 518.67 641.82 \n\
                   1 2 0.0019 -0.0003 100.0 518.67 642.15 \n";
        let table = parse_readings(Cursor::new(raw)).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(
            table.column_names(),
            vec![
                "engine_id",
                "time_cycles",
                "operational_setting_1",
                "operational_setting_2",
                "operational_setting_3",
                "sensor_1",
                "sensor_2"
            ]
        );
        assert_eq!(table.column("sensor_2").unwrap().kind, ColumnKind::Sensor);
        assert_eq!(table.values("time_cycles").unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn test_all_nan_column_dropped() {
        let raw = "1 1 0.5 NaN\n1 2 0.6 NaN\n";
        let table = parse_readings(Cursor::new(raw)).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["engine_id", "time_cycles", "operational_setting_1"]
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let raw = "\n1 1 0.5\n\n1 2 0.6\n   \n";
        let table = parse_readings(Cursor::new(raw)).unwrap();
        assert_eq!(table.num_rows(), 2);
    }

    #[test]
    fn test_inconsistent_width_rejected() {
        let raw = "1 1 0.5 0.7\n1 2 0.6\n";
        let err = parse_readings(Cursor::new(raw)).unwrap_err();
        assert!(matches!(err, LoaderError::Schema { line: 2, .. }));
    }

    #[test]
    fn test_too_wide_rejected() {
        let raw = vec!["1"; SCHEMA_WIDTH + 1].join(" ");
        assert!(matches!(
            parse_readings(Cursor::new(raw)),
            Err(LoaderError::Schema { line: 1, .. })
        ));
    }

    #[test]
    fn test_bad_number_rejected() {
        let raw = "1 1 abc\n";
        assert!(matches!(
            parse_readings(Cursor::new(raw)),
            Err(LoaderError::Schema { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(parse_readings(Cursor::new("")).is_err());
    }

    #[test]
    fn test_parse_truth() {
        let truth = parse_truth(Cursor::new("112 \n98\n\n69\n")).unwrap();
        assert_eq!(truth, vec![112, 98, 69]);
        assert!(parse_truth(Cursor::new("12\n-3\n")).is_err());
    }
}
