use thiserror::Error;

// ---------------------------------------------------------------------------
// TableError – typed failures of the tabular model
// ---------------------------------------------------------------------------

/// Errors raised by [`Table`] construction and column access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("dataset '{table}' has no column named '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("dataset '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("dataset '{table}': column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        table: String,
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("dataset '{table}' has no columns")]
    NoColumns { table: String },

    #[error("dataset '{table}': column '{column}' has no rows, mean is undefined")]
    EmptyColumn { table: String, column: String },
}

// ---------------------------------------------------------------------------
// Column – one named series of values
// ---------------------------------------------------------------------------

/// A single named column of numeric values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Arithmetic mean of the column, `None` when it has no rows.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded dataset
// ---------------------------------------------------------------------------

/// An ordered collection of named numeric columns aligned by row.
///
/// Invariants, checked by [`Table::new`]: at least one column, unique column
/// names, and equal row counts across all columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Dataset name, used in error messages ("tuition", "financial", ...).
    pub name: String,
    /// Columns in load order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Build a table from loaded columns, validating the shape invariants.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, TableError> {
        let name = name.into();

        let Some(first) = columns.first() else {
            return Err(TableError::NoColumns { table: name });
        };
        let expected = first.values.len();

        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(TableError::DuplicateColumn {
                    table: name,
                    column: col.name.clone(),
                });
            }
            if col.values.len() != expected {
                return Err(TableError::RaggedColumn {
                    table: name,
                    column: col.name.clone(),
                    expected,
                    actual: col.values.len(),
                });
            }
        }

        Ok(Table { name, columns })
    }

    /// Number of rows (equal for every column).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in load order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::MissingColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Arithmetic mean of the named column.
    ///
    /// Fails with [`TableError::MissingColumn`] when the column is absent and
    /// [`TableError::EmptyColumn`] when it has no rows.
    pub fn column_mean(&self, name: &str) -> Result<f64, TableError> {
        let col = self.column(name)?;
        col.mean().ok_or_else(|| TableError::EmptyColumn {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// `(name, mean)` for every column, in load order.
    pub fn column_means(&self) -> Result<Vec<(String, f64)>, TableError> {
        self.columns
            .iter()
            .map(|c| {
                let mean = c.mean().ok_or_else(|| TableError::EmptyColumn {
                    table: self.name.clone(),
                    column: c.name.clone(),
                })?;
                Ok((c.name.clone(), mean))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(
            "salaries",
            vec![
                Column::new("Engineering", vec![10_000.0, 20_000.0, 30_000.0]),
                Column::new("Nursing", vec![5.0, 7.0, 9.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn column_mean_matches_manual_sum() {
        let t = table();
        assert_eq!(t.column_mean("Engineering").unwrap(), 20_000.0);
        assert_eq!(t.column_mean("Nursing").unwrap(), 7.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let t = table();
        assert_eq!(
            t.column_mean("Basket Weaving"),
            Err(TableError::MissingColumn {
                table: "salaries".into(),
                column: "Basket Weaving".into(),
            })
        );
    }

    #[test]
    fn duplicate_column_rejected() {
        let err = Table::new(
            "t",
            vec![Column::new("a", vec![1.0]), Column::new("a", vec![2.0])],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { .. }));
    }

    #[test]
    fn ragged_columns_rejected() {
        let err = Table::new(
            "t",
            vec![
                Column::new("a", vec![1.0, 2.0]),
                Column::new("b", vec![3.0]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::RaggedColumn {
                table: "t".into(),
                column: "b".into(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn empty_table_rejected() {
        assert!(matches!(
            Table::new("t", vec![]).unwrap_err(),
            TableError::NoColumns { .. }
        ));
    }

    #[test]
    fn mean_over_zero_rows_is_an_error() {
        let t = Table::new("t", vec![Column::new("a", vec![])]).unwrap();
        assert!(matches!(
            t.column_mean("a").unwrap_err(),
            TableError::EmptyColumn { .. }
        ));
    }

    #[test]
    fn column_means_preserve_load_order() {
        let means = table().column_means().unwrap();
        assert_eq!(means[0].0, "Engineering");
        assert_eq!(means[1], ("Nursing".to_string(), 7.0));
    }
}
