//! Column Table Implementation

use crate::{ColumnKind, TableError};

/// A named column of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<f64>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Whether any value is NaN or infinite
    pub fn has_invalid(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }
}

/// Ordered collection of equal-length columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking lengths and names
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.contains(&column.name) {
            return Err(TableError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() {
            self.rows = column.values.len();
        } else if column.values.len() != self.rows {
            return Err(TableError::LengthMismatch {
                name: column.name,
                expected: self.rows,
                actual: column.values.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of a column, or a schema error if it is absent
    pub fn values(&self, name: &str) -> Result<&[f64], TableError> {
        self.column(name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Mutable values of a column. Length is fixed.
    pub fn values_mut(&mut self, name: &str) -> Result<&mut [f64], TableError> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| c.values.as_mut_slice())
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Names of columns whose kind satisfies the predicate
    pub fn names_where(&self, pred: impl Fn(&ColumnKind) -> bool) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| pred(&c.kind))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Names of raw sensor columns
    pub fn sensor_names(&self) -> Vec<String> {
        self.names_where(ColumnKind::is_sensor)
    }

    /// Consume the table and drop the named columns. Unknown names are ignored.
    pub fn drop_columns<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.columns
            .retain(|c| !names.iter().any(|n| n.as_ref() == c.name));
        if self.columns.is_empty() {
            self.rows = 0;
        }
        self
    }

    /// Keep only the named columns, in the given order
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, TableError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let column = self
                .column(name.as_ref())
                .ok_or_else(|| TableError::MissingColumn(name.as_ref().to_string()))?;
            columns.push(column.clone());
        }
        Self::from_columns(columns)
    }

}
