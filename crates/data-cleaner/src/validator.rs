//! Invalid Value Detection

use sensor_table::Table;

/// Measurement columns (settings and sensors) holding any NaN or infinite
/// value. Keys and targets are never reported.
pub fn invalid_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| c.kind.is_measurement() && c.has_invalid())
        .map(|c| c.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_table::{Column, ColumnKind, RUL};

    #[test]
    fn test_nan_and_inf_detected() {
        let table = Table::from_columns(vec![
            Column::new("operational_setting_1", ColumnKind::Setting, vec![0.1, f64::NAN]),
            Column::new("sensor_1", ColumnKind::Sensor, vec![1.0, 2.0]),
            Column::new("sensor_2", ColumnKind::Sensor, vec![f64::INFINITY, 2.0]),
            Column::new(RUL, ColumnKind::Target, vec![f64::NAN, 0.0]),
        ])
        .unwrap();
        assert_eq!(
            invalid_columns(&table),
            vec!["operational_setting_1", "sensor_2"]
        );
    }
}
