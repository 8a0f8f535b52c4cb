//! Generic SQL dialect.

use std::fmt;

use tracing::{debug, warn};

use super::{resolve_data_type, sized, Dialect};
use crate::connection::{query_count, query_text, SharedConnection, SqlConnection};
use crate::error::{DialectError, Result};
use crate::field::{FieldDescriptor, FieldKind, StructKind};
use crate::naming::{DefaultForeignKeyNamer, ForeignKeyNamer};
use crate::value::ToSqlValue;

/// A baseline dialect built on information-schema catalogs.
///
/// Usable on its own or composed by engine-specific dialects, which reuse
/// its connection handle and foreign key namer.
#[derive(Clone, Default)]
pub struct GenericDialect<N = DefaultForeignKeyNamer> {
    conn: Option<SharedConnection>,
    namer: N,
}

impl GenericDialect {
    /// Creates a generic dialect with the default foreign key namer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: ForeignKeyNamer> GenericDialect<N> {
    /// Attaches a connection.
    #[must_use]
    pub fn with_connection(mut self, conn: SharedConnection) -> Self {
        self.conn = Some(conn);
        self
    }

    /// Replaces the foreign key namer.
    #[must_use]
    pub fn with_namer<M: ForeignKeyNamer>(self, namer: M) -> GenericDialect<M> {
        GenericDialect {
            conn: self.conn,
            namer,
        }
    }

    /// The attached connection, if any.
    #[must_use]
    pub fn connection(&self) -> Option<&dyn SqlConnection> {
        self.conn.as_deref()
    }

    /// The foreign key namer.
    #[must_use]
    pub fn namer(&self) -> &N {
        &self.namer
    }
}

impl<N: ForeignKeyNamer> GenericDialect<N> {
    /// Runs a catalog count scoped to the current database.
    fn count_in_current_database(&self, query: &str, args: &[&str]) -> i64 {
        if self.connection().is_none() {
            warn!(sql = %query, "No connection attached, skipping introspection query");
            return 0;
        }
        let mut bound = vec![self.current_database().to_sql_value()];
        bound.extend(args.iter().map(|arg| arg.to_sql_value()));
        query_count(self.connection(), query, &bound)
    }
}

impl<N> fmt::Debug for GenericDialect<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericDialect")
            .field("connected", &self.conn.is_some())
            .finish_non_exhaustive()
    }
}

impl<N: ForeignKeyNamer> Dialect for GenericDialect<N> {
    fn name(&self) -> &'static str {
        "common"
    }

    fn set_connection(&mut self, conn: SharedConnection) {
        self.conn = Some(conn);
    }

    fn bind_var(&self, _position: usize) -> String {
        "$$".to_string()
    }

    fn data_type_of(&self, field: &FieldDescriptor) -> Result<String> {
        resolve_data_type(field, infer_type)
    }

    fn has_index(&self, table: &str, index: &str) -> bool {
        self.count_in_current_database(
            "SELECT count(*) FROM INFORMATION_SCHEMA.STATISTICS WHERE table_schema = ? AND table_name = ? AND index_name = ?",
            &[table, index],
        ) > 0
    }

    fn remove_index(&self, _table: &str, index: &str) -> Result<()> {
        let conn = self.connection().ok_or(DialectError::NoConnection)?;
        let sql = format!("DROP INDEX {index}");
        debug!(sql = %sql, "Removing index");
        conn.exec(&sql, &[])?;
        Ok(())
    }

    fn has_foreign_key(&self, _table: &str, _name: &str) -> bool {
        false
    }

    fn has_table(&self, table: &str) -> bool {
        self.count_in_current_database(
            "SELECT count(*) FROM INFORMATION_SCHEMA.TABLES WHERE table_schema = ? AND table_name = ?",
            &[table],
        ) > 0
    }

    fn has_column(&self, table: &str, column: &str) -> bool {
        self.count_in_current_database(
            "SELECT count(*) FROM INFORMATION_SCHEMA.COLUMNS WHERE table_schema = ? AND table_name = ? AND column_name = ?",
            &[table, column],
        ) > 0
    }

    fn current_database(&self) -> String {
        query_text(self.connection(), "SELECT DATABASE()")
    }

    fn build_foreign_key_name(&self, table: &str, field: &str, dest: &str) -> String {
        self.namer.build_foreign_key_name(table, field, dest)
    }
}

fn infer_type(field: &FieldDescriptor) -> Option<String> {
    let kind = field.kind;
    let sql_type = match kind {
        FieldKind::Bool => "BOOLEAN".to_string(),
        _ if kind.is_small_integer() => auto_increment("INTEGER", field),
        _ if kind.is_big_integer() => auto_increment("BIGINT", field),
        _ if kind.is_float() => "FLOAT".to_string(),
        FieldKind::String => sized("VARCHAR", field.size),
        FieldKind::Struct(StructKind::Timestamp) => "TIMESTAMP".to_string(),
        FieldKind::Bytes => sized("BINARY", field.size),
        _ => return None,
    };
    Some(sql_type)
}

fn auto_increment(sql_type: &str, field: &FieldDescriptor) -> String {
    if field.is_auto_increment() {
        format!("{sql_type} AUTO_INCREMENT")
    } else {
        sql_type.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageValue;

    fn dialect() -> GenericDialect {
        GenericDialect::new()
    }

    #[test]
    fn test_generic_dialect() {
        let d = dialect();
        assert_eq!(d.name(), "common");
        assert_eq!(d.bind_var(1), "$$");
        assert_eq!(d.quote("users"), "\"users\"");
        assert_eq!(d.select_from_dummy_table(), "");
        assert_eq!(d.last_insert_id_returning_suffix("users", "id"), "");
        assert_eq!(d.primary_key(&["id".to_string()]), "");
        assert_eq!(d.query_field_name("users"), "users.");
    }

    #[test]
    fn test_quote_does_not_escape() {
        assert_eq!(dialect().quote("a\"b"), "\"a\"b\"");
    }

    #[test]
    fn test_small_integers() {
        let d = dialect();
        for kind in [
            FieldKind::I8,
            FieldKind::I16,
            FieldKind::I32,
            FieldKind::Isize,
            FieldKind::U8,
            FieldKind::U16,
            FieldKind::U32,
            FieldKind::Usize,
        ] {
            let field = FieldDescriptor::new("n", kind);
            assert_eq!(d.data_type_of(&field).unwrap(), "INTEGER", "{kind}");
            assert_eq!(
                d.data_type_of(&field.auto_increment()).unwrap(),
                "INTEGER AUTO_INCREMENT",
                "{kind}"
            );
        }
    }

    #[test]
    fn test_big_integers() {
        let d = dialect();
        for kind in [FieldKind::I64, FieldKind::U64] {
            let field = FieldDescriptor::new("n", kind);
            assert_eq!(d.data_type_of(&field).unwrap(), "BIGINT");
            assert_eq!(
                d.data_type_of(&field.auto_increment()).unwrap(),
                "BIGINT AUTO_INCREMENT"
            );
        }
    }

    #[test]
    fn test_scalar_types() {
        let d = dialect();
        assert_eq!(
            d.data_type_of(&FieldDescriptor::of::<bool>("active")).unwrap(),
            "BOOLEAN"
        );
        assert_eq!(
            d.data_type_of(&FieldDescriptor::of::<f32>("ratio")).unwrap(),
            "FLOAT"
        );
        assert_eq!(
            d.data_type_of(&FieldDescriptor::of::<chrono::NaiveDateTime>("created_at"))
                .unwrap(),
            "TIMESTAMP"
        );
    }

    #[test]
    fn test_string_sizes() {
        let d = dialect();
        let field = |size| FieldDescriptor::of::<String>("name").size(size);
        assert_eq!(d.data_type_of(&field(0)).unwrap(), "VARCHAR(65532)");
        assert_eq!(d.data_type_of(&field(10)).unwrap(), "VARCHAR(10)");
        assert_eq!(d.data_type_of(&field(100_000)).unwrap(), "VARCHAR(65532)");
    }

    #[test]
    fn test_bytes_sizes() {
        let d = dialect();
        let field = |size| FieldDescriptor::of::<Vec<u8>>("payload").size(size);
        assert_eq!(d.data_type_of(&field(0)).unwrap(), "BINARY(65532)");
        assert_eq!(d.data_type_of(&field(16)).unwrap(), "BINARY(16)");
    }

    #[test]
    fn test_explicit_type_with_modifier() {
        let field = FieldDescriptor::of::<String>("bio")
            .sql_type("TEXT")
            .additional_type("NOT NULL");
        assert_eq!(dialect().data_type_of(&field).unwrap(), "TEXT NOT NULL");
    }

    #[test]
    fn test_explicit_type_bypasses_inference() {
        let field = FieldDescriptor::new("tags", FieldKind::Slice).sql_type("JSON");
        assert_eq!(dialect().data_type_of(&field).unwrap(), "JSON");
    }

    #[test]
    fn test_unmapped_kind_fails() {
        let d = dialect();
        for kind in [
            FieldKind::Slice,
            FieldKind::Map,
            FieldKind::Other,
            FieldKind::Struct(StructKind::Plain),
        ] {
            let field = FieldDescriptor::new("x", kind).type_name("Custom");
            let err = d.data_type_of(&field).unwrap_err();
            match err {
                DialectError::TypeMapping {
                    field_type,
                    field_kind,
                } => {
                    assert_eq!(field_type, "Custom");
                    assert_eq!(field_kind, kind.as_str());
                }
                other => panic!("Expected TypeMapping, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_data_type_of_is_pure() {
        let d = dialect();
        let field = FieldDescriptor::of::<u32>("id")
            .auto_increment()
            .additional_type("NOT NULL");
        assert_eq!(d.data_type_of(&field).unwrap(), d.data_type_of(&field).unwrap());
    }

    #[test]
    fn test_io_without_connection() {
        let d = dialect();
        assert!(!d.has_table("users"));
        assert!(!d.has_column("users", "id"));
        assert!(!d.has_index("users", "idx_users_id"));
        assert!(!d.has_foreign_key("users", "fk"));
        assert_eq!(d.current_database(), "");
        assert!(matches!(
            d.remove_index("users", "idx_users_id"),
            Err(DialectError::NoConnection)
        ));
    }

    #[test]
    fn test_foreign_key_name_uses_namer() {
        struct Upper;

        impl ForeignKeyNamer for Upper {
            fn build_foreign_key_name(&self, table: &str, field: &str, dest: &str) -> String {
                format!("FK_{table}_{field}_{dest}").to_uppercase()
            }
        }

        assert_eq!(
            dialect().build_foreign_key_name("orders", "customer id!", "customers"),
            "orders_customer_id_customers_foreign"
        );
        let custom = dialect().with_namer(Upper);
        assert_eq!(
            custom.build_foreign_key_name("a", "b", "c"),
            "FK_A_B_C"
        );
        assert_eq!(custom.namer().build_foreign_key_name("a", "b", "c"), "FK_A_B_C");
        assert_eq!(
            dialect().namer().build_foreign_key_name("t", "f", "d"),
            "t_f_d_foreign"
        );
    }

    #[test]
    fn test_limit_and_offset() {
        let d = dialect();
        assert_eq!(d.limit_and_offset_sql(10_i64.into(), 0_i64.into()), " LIMIT 10");
        assert_eq!(
            d.limit_and_offset_sql(PageValue::Absent, 5_i64.into()),
            " OFFSET 5"
        );
        assert_eq!(
            d.limit_and_offset_sql("abc".into(), 5_i64.into()),
            " OFFSET 5"
        );
    }
}
