//! PostgreSQL dialect.

use super::{resolve_data_type, Dialect, GenericDialect, MAX_SIZED_COLUMN};
use crate::connection::{query_count, query_text, SharedConnection, SqlConnection};
use crate::error::Result;
use crate::field::{FieldDescriptor, FieldKind, StructKind};
use crate::naming::{DefaultForeignKeyNamer, ForeignKeyNamer};
use crate::value::ToSqlValue;

/// PostgreSQL dialect.
///
/// Wraps a [`GenericDialect`] for the connection handle, the foreign key
/// namer and the statements PostgreSQL shares with it.
#[derive(Debug, Clone, Default)]
pub struct PostgresDialect<N = DefaultForeignKeyNamer> {
    base: GenericDialect<N>,
}

impl PostgresDialect {
    /// Creates a PostgreSQL dialect with the default foreign key namer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: ForeignKeyNamer> PostgresDialect<N> {
    /// Builds a PostgreSQL dialect on top of a configured generic one.
    #[must_use]
    pub fn from_generic(base: GenericDialect<N>) -> Self {
        Self { base }
    }

    /// Attaches a connection.
    #[must_use]
    pub fn with_connection(self, conn: SharedConnection) -> Self {
        Self {
            base: self.base.with_connection(conn),
        }
    }

    fn connection(&self) -> Option<&dyn SqlConnection> {
        self.base.connection()
    }
}

impl<N: ForeignKeyNamer> Dialect for PostgresDialect<N> {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn set_connection(&mut self, conn: SharedConnection) {
        self.base.set_connection(conn);
    }

    fn bind_var(&self, position: usize) -> String {
        format!("${position}")
    }

    fn data_type_of(&self, field: &FieldDescriptor) -> Result<String> {
        resolve_data_type(field, infer_type)
    }

    fn has_index(&self, table: &str, index: &str) -> bool {
        query_count(
            self.connection(),
            "SELECT count(*) FROM pg_indexes WHERE tablename = $1 AND indexname = $2 AND schemaname = CURRENT_SCHEMA()",
            &[table.to_sql_value(), index.to_sql_value()],
        ) > 0
    }

    fn remove_index(&self, table: &str, index: &str) -> Result<()> {
        self.base.remove_index(table, index)
    }

    fn has_foreign_key(&self, table: &str, name: &str) -> bool {
        query_count(
            self.connection(),
            "SELECT count(con.conname) FROM pg_constraint con WHERE $1::regclass::oid = con.conrelid AND con.conname = $2 AND con.contype = 'f'",
            &[table.to_sql_value(), name.to_sql_value()],
        ) > 0
    }

    fn has_table(&self, table: &str) -> bool {
        query_count(
            self.connection(),
            "SELECT count(*) FROM INFORMATION_SCHEMA.tables WHERE table_name = $1 AND table_type = 'BASE TABLE' AND table_schema = CURRENT_SCHEMA()",
            &[table.to_sql_value()],
        ) > 0
    }

    fn has_column(&self, table: &str, column: &str) -> bool {
        query_count(
            self.connection(),
            "SELECT count(*) FROM INFORMATION_SCHEMA.columns WHERE table_name = $1 AND column_name = $2 AND table_schema = CURRENT_SCHEMA()",
            &[table.to_sql_value(), column.to_sql_value()],
        ) > 0
    }

    fn current_database(&self) -> String {
        query_text(self.connection(), "SELECT CURRENT_DATABASE()")
    }

    fn last_insert_id_returning_suffix(&self, table: &str, column: &str) -> String {
        format!("RETURNING {table}.{column}")
    }

    fn build_foreign_key_name(&self, table: &str, field: &str, dest: &str) -> String {
        self.base.build_foreign_key_name(table, field, dest)
    }
}

fn infer_type(field: &FieldDescriptor) -> Option<String> {
    let kind = field.kind;
    let auto_increment = field.is_auto_increment();
    let sql_type = match kind {
        FieldKind::Bool => "BOOLEAN",
        _ if kind.is_small_integer() => {
            if auto_increment {
                "SERIAL"
            } else {
                "INTEGER"
            }
        }
        _ if kind.is_big_integer() => {
            if auto_increment {
                "BIGSERIAL"
            } else {
                "BIGINT"
            }
        }
        _ if kind.is_float() => "NUMERIC",
        FieldKind::String => {
            if field.size > 0 && field.size < MAX_SIZED_COLUMN {
                return Some(format!("VARCHAR({})", field.size));
            }
            "TEXT"
        }
        FieldKind::Struct(StructKind::Timestamp) => "TIMESTAMP WITH TIME ZONE",
        FieldKind::Map => "HSTORE",
        FieldKind::Bytes => "BYTEA",
        _ => return None,
    };
    Some(sql_type.to_string())
}
