use rusqlite::fallible_iterator::FallibleIterator;
use rusqlite::types::Value;
use rusqlite::{Batch, Connection, Statement};

use crate::error::RelayError;
use crate::results::{ResultSet, StatementResult};
use crate::types::CellValue;

/// Extract a `CellValue` from a `SQLite` row.
///
/// # Errors
///
/// Returns `RelayError` if the value cannot be read.
pub fn sqlite_extract_value(row: &rusqlite::Row, idx: usize) -> Result<CellValue, RelayError> {
    let value: Value = row.get(idx)?;
    match value {
        Value::Null => Ok(CellValue::Null),
        Value::Integer(i) => Ok(CellValue::Int(i)),
        Value::Real(f) => Ok(CellValue::Float(f)),
        Value::Text(s) => Ok(CellValue::Text(s)),
        Value::Blob(b) => Ok(CellValue::Blob(b)),
    }
}

/// Step a prepared statement to completion, collecting its rows.
///
/// Returns `None` when the statement produced no rows, so DDL, DML and empty selects do
/// not contribute an entry to the result set. Placeholders are left unbound (NULL), the
/// same way `execute_batch` treats them.
///
/// # Errors
/// Returns `RelayError::SqliteError` if stepping the statement fails.
pub fn build_statement_result(
    stmt: &mut Statement<'_>,
) -> Result<Option<StatementResult>, RelayError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result: Option<StatementResult> = None;
    let mut rows_iter = stmt.raw_query();
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value(row, i)?);
        }
        result
            .get_or_insert_with(|| StatementResult::new(column_names.clone()))
            .push_row(row_values);
    }

    Ok(result)
}

/// Run every statement in `sql`, in order, and gather the rows of each.
///
/// Statements before a failing one have already taken effect when the error is returned.
///
/// # Errors
/// Returns `RelayError::SqliteError` if any statement fails to prepare or step.
pub fn build_result_set(conn: &Connection, sql: &str) -> Result<ResultSet, RelayError> {
    let mut result_set = ResultSet::default();
    let mut batch = Batch::new(conn, sql);
    while let Some(mut stmt) = batch.next()? {
        if let Some(statement) = build_statement_result(&mut stmt)? {
            result_set.push(statement);
        }
    }
    Ok(result_set)
}
