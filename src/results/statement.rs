use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::CellValue;

/// Rows produced by one statement of a query
///
/// Columns and rows keep the order the engine produced them in; every row in
/// `values` is ordered like `columns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    /// Column names, in select-list order
    pub columns: Vec<String>,
    /// Row values, in step order
    pub values: Vec<Vec<CellValue>>,
}

impl StatementResult {
    /// Create an empty statement result for the given columns
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            values: Vec::new(),
        }
    }

    /// Get the index of a column by name
    ///
    /// # Returns
    ///
    /// The index of the first column with that name, or None if not found
    #[must_use]
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col == column_name)
    }

    /// Get a value by row index and column name
    #[must_use]
    pub fn get(&self, row: usize, column_name: &str) -> Option<&CellValue> {
        let idx = self.column_index(column_name)?;
        self.values.get(row).and_then(|values| values.get(idx))
    }

    /// Add a row to the result
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.values.push(row);
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Map each row to a column-name keyed lookup
    #[must_use]
    pub fn rows_by_name(&self) -> Vec<HashMap<&str, &CellValue>> {
        self.values
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter())
                    .collect()
            })
            .collect()
    }
}
