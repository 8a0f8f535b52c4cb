//! A blocking [`SqlConnection`] over an sqlx SQLite pool.
//!
//! Dialect operations are synchronous, so the pool is driven by a private
//! current-thread tokio runtime. Do not call these methods from inside
//! another tokio runtime.

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row as _, TypeInfo, ValueRef};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::connection::{ExecResult, Row, SqlConnection};
use crate::error::{DialectError, Result};
use crate::value::SqlValue;

/// A SQLite connection usable by dialects.
pub struct SqliteConnection {
    runtime: Runtime,
    pool: SqlitePool,
}

impl SqliteConnection {
    /// Opens a pool as described by `config`.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let pool = runtime.block_on(
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.url),
        )?;
        info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Connected to SQLite"
        );
        Ok(Self { runtime, pool })
    }

    /// The underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl std::fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

impl SqlConnection for SqliteConnection {
    fn query_row(&self, query: &str, args: &[SqlValue]) -> Result<Row> {
        debug!(sql = %query, "Executing query");
        let row = self
            .runtime
            .block_on(bind_args(sqlx::query(query), args).fetch_optional(&self.pool))?
            .ok_or(DialectError::NoRows)?;
        decode_row(&row)
    }

    fn exec(&self, query: &str, args: &[SqlValue]) -> Result<ExecResult> {
        debug!(sql = %query, "Executing SQL");
        let result = self
            .runtime
            .block_on(bind_args(sqlx::query(query), args).execute(&self.pool))?;
        Ok(ExecResult {
            rows_affected: result.rows_affected(),
        })
    }
}

fn bind_args<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.as_str()),
            SqlValue::Blob(b) => query.bind(b.as_slice()),
        };
    }
    query
}

fn decode_row(row: &SqliteRow) -> Result<Row> {
    let mut values = Vec::with_capacity(row.len());
    for index in 0..row.len() {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            values.push(SqlValue::Null);
            continue;
        }
        let type_name = raw.type_info().name().to_string();
        let value = match type_name.as_str() {
            "INTEGER" => SqlValue::Int(row.try_get(index)?),
            "REAL" => SqlValue::Float(row.try_get(index)?),
            "BLOB" => SqlValue::Blob(row.try_get(index)?),
            _ => SqlValue::Text(row.try_get(index)?),
        };
        values.push(value);
    }
    Ok(Row::new(values))
}
