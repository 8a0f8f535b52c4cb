//! SQL dialect support.
//!
//! A dialect answers the engine-specific questions the query and migration
//! layers ask while building SQL: which column type represents a field, how
//! identifiers are quoted, how placeholders and pagination are written, and
//! whether a table, column, index or foreign key already exists.
//!
//! SQL generation never needs a connection. Only the existence checks,
//! [`Dialect::current_database`] and [`Dialect::remove_index`] go through the
//! connection attached with [`Dialect::set_connection`].

mod generic;
mod postgres;

pub use generic::GenericDialect;
pub use postgres::PostgresDialect;

use crate::connection::SharedConnection;
use crate::error::{DialectError, Result};
use crate::field::FieldDescriptor;
use crate::pagination::{self, PageValue};

/// Largest declared size rendered as-is for sized text and binary columns.
pub const MAX_SIZED_COLUMN: usize = 65532;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Attaches the connection used for introspection.
    ///
    /// The dialect keeps a shared handle and never closes it.
    fn set_connection(&mut self, conn: SharedConnection);

    /// Returns the placeholder for the bind variable at `position`.
    fn bind_var(&self, position: usize) -> String;

    /// Quotes an identifier.
    ///
    /// Quote characters inside `key` are not escaped.
    fn quote(&self, key: &str) -> String {
        format!("\"{key}\"")
    }

    /// Returns the column type for a field.
    fn data_type_of(&self, field: &FieldDescriptor) -> Result<String>;

    /// Returns whether `index` exists on `table`.
    fn has_index(&self, table: &str, index: &str) -> bool;

    /// Drops `index` from `table`.
    fn remove_index(&self, table: &str, index: &str) -> Result<()>;

    /// Returns whether the foreign key `name` exists on `table`.
    fn has_foreign_key(&self, table: &str, name: &str) -> bool;

    /// Returns whether `table` exists.
    fn has_table(&self, table: &str) -> bool;

    /// Returns whether `column` exists on `table`.
    fn has_column(&self, table: &str, column: &str) -> bool;

    /// Returns the name of the active database, or an empty string.
    fn current_database(&self) -> String;

    /// Renders the LIMIT/OFFSET suffix of a query.
    fn limit_and_offset_sql(&self, limit: PageValue, offset: PageValue) -> String {
        pagination::limit_and_offset(&limit, &offset)
    }

    /// Returns the FROM clause needed to select constants, if any.
    fn select_from_dummy_table(&self) -> String {
        String::new()
    }

    /// Returns the suffix that makes an INSERT return the new id.
    fn last_insert_id_returning_suffix(&self, _table: &str, _column: &str) -> String {
        String::new()
    }

    /// Returns the extra primary key clause for `keys`, if any.
    fn primary_key(&self, _keys: &[String]) -> String {
        String::new()
    }

    /// Returns the qualifier prefix for fields of `name`.
    fn query_field_name(&self, name: &str) -> String {
        format!("{name}.")
    }

    /// Builds a foreign key constraint name.
    fn build_foreign_key_name(&self, table: &str, field: &str, dest: &str) -> String;
}

/// Resolves a field's column type: the explicit SQL type if set, otherwise
/// `infer`, followed by the field's additional type modifier.
pub(crate) fn resolve_data_type(
    field: &FieldDescriptor,
    infer: fn(&FieldDescriptor) -> Option<String>,
) -> Result<String> {
    let sql_type = match field.explicit_sql_type() {
        Some(sql_type) => sql_type.to_string(),
        None => infer(field).ok_or_else(|| DialectError::TypeMapping {
            field_type: field.type_name.clone(),
            field_kind: field.kind.to_string(),
        })?,
    };
    Ok(with_additional_type(sql_type, field))
}

/// Appends the field's additional type modifier to `sql_type`.
pub(crate) fn with_additional_type(sql_type: String, field: &FieldDescriptor) -> String {
    let additional = field.additional_type.trim();
    if additional.is_empty() {
        sql_type
    } else {
        format!("{sql_type} {additional}")
    }
}

/// Renders `name(size)`, falling back to the maximum size.
pub(crate) fn sized(name: &str, size: usize) -> String {
    if size > 0 && size < MAX_SIZED_COLUMN {
        format!("{name}({size})")
    } else {
        format!("{name}({MAX_SIZED_COLUMN})")
    }
}
