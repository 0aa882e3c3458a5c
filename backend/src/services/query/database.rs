//! Read-only query execution against the SQLite database.
//!
//! Every call opens its own connection with `SQLITE_OPEN_READ_ONLY`, so a
//! submitted statement that tries to write fails at execution time and is
//! reported like any other invalid query.

use common::model::row::{CellValue, Row};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub(crate) enum QueryError {
    /// The database file could not be opened.
    #[error("Database unavailable: {0}")]
    Unavailable(String),
    /// The statement failed to prepare or execute.
    #[error("Query failed: {0}")]
    Invalid(String),
}

fn invalid(e: rusqlite::Error) -> QueryError {
    QueryError::Invalid(e.to_string())
}

/// Runs `sql` and returns every result row keyed by column name, in column
/// order.
pub(crate) fn run_query(database: &Path, sql: &str) -> Result<Vec<Row>, QueryError> {
    let sql = sql.trim();
    if sql.is_empty() {
        return Err(QueryError::Invalid("empty query".to_string()));
    }

    let conn = Connection::open_with_flags(
        database,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| QueryError::Unavailable(format!("{}: {}", database.display(), e)))?;

    let mut stmt = conn.prepare(sql).map_err(invalid)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut result = stmt.query([]).map_err(invalid)?;

    let mut rows = Vec::new();
    while let Some(sql_row) = result.next().map_err(invalid)? {
        let mut row = Row::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            let value = to_cell(sql_row.get_ref(idx).map_err(invalid)?);
            row.insert(name.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}

fn to_cell(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Number(i as f64),
        ValueRef::Real(f) => CellValue::Number(f),
        ValueRef::Text(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => CellValue::Text(bytes.iter().map(|b| format!("{:02x}", b)).collect()),
    }
}
