//! The connection contract a dialect issues its queries through.
//!
//! The dialect never owns or closes a connection. The owning layer hands
//! one over as a [`SharedConnection`] and manages its lifetime, pooling and
//! synchronisation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{DialectError, Result};
use crate::value::{FromSqlValue, SqlValue};

/// A synchronous SQL-executing connection.
pub trait SqlConnection: Send + Sync {
    /// Runs a query expected to produce one row and returns its first row.
    ///
    /// Returns [`DialectError::NoRows`] when the query produced nothing.
    fn query_row(&self, query: &str, args: &[SqlValue]) -> Result<Row>;

    /// Runs a statement that produces no rows.
    fn exec(&self, query: &str, args: &[SqlValue]) -> Result<ExecResult>;
}

/// A connection handle shared with the owning layer.
pub type SharedConnection = Arc<dyn SqlConnection>;

/// One result row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    /// Creates a row from its column values.
    #[must_use]
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value of a column.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Reads a column as `T`.
    pub fn scan<T: FromSqlValue>(&self, index: usize) -> Result<T> {
        let value = self.values.get(index).ok_or_else(|| DialectError::Scan {
            index,
            expected: T::TYPE_NAME,
            found: format!("row with {} column(s)", self.values.len()),
        })?;
        T::from_sql_value(value).ok_or_else(|| DialectError::Scan {
            index,
            expected: T::TYPE_NAME,
            found: value.kind_name().to_string(),
        })
    }
}

impl From<Vec<SqlValue>> for Row {
    fn from(values: Vec<SqlValue>) -> Self {
        Self::new(values)
    }
}

/// Outcome of [`SqlConnection::exec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Rows changed by the statement, where the engine reports it.
    pub rows_affected: u64,
}

/// Runs a `count(*)` style query and returns its first column.
///
/// Any failure (no connection, query error, scan error) yields 0.
pub(crate) fn query_count(
    conn: Option<&dyn SqlConnection>,
    query: &str,
    args: &[SqlValue],
) -> i64 {
    query_scalar::<i64>(conn, query, args).unwrap_or(0)
}

/// Runs a single-value query and returns its first column as text.
///
/// Any failure yields an empty string.
pub(crate) fn query_text(conn: Option<&dyn SqlConnection>, query: &str) -> String {
    query_scalar::<String>(conn, query, &[]).unwrap_or_default()
}

fn query_scalar<T: FromSqlValue>(
    conn: Option<&dyn SqlConnection>,
    query: &str,
    args: &[SqlValue],
) -> Option<T> {
    let Some(conn) = conn else {
        warn!(sql = %query, "No connection attached, skipping introspection query");
        return None;
    };

    debug!(sql = %query, args = args.len(), "Running introspection query");
    match conn.query_row(query, args).and_then(|row| row.scan::<T>(0)) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(sql = %query, error = %err, "Introspection query failed, treating as absent");
            None
        }
    }
}
