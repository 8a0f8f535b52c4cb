use std::collections::HashMap;

use chrono::{DateTime, Utc};
use oxide_dialect::{
    Dialect, DialectError, DialectRegistry, FieldDescriptor, FieldKind, GenericDialect,
    PageValue, TagSettings,
};

struct Column {
    field: FieldDescriptor,
    expected: &'static str,
}

fn user_columns() -> Vec<Column> {
    vec![
        Column {
            field: FieldDescriptor::of::<u32>("id")
                .with_tags(TagSettings::parse("primary_key;auto_increment")),
            expected: "INTEGER AUTO_INCREMENT",
        },
        Column {
            field: FieldDescriptor::of::<String>("name")
                .with_tags(TagSettings::parse("size:64;not null")),
            expected: "VARCHAR(64) NOT NULL",
        },
        Column {
            field: FieldDescriptor::of::<String>("email")
                .with_tags(TagSettings::parse("not null;unique")),
            expected: "VARCHAR(255) NOT NULL UNIQUE",
        },
        Column {
            field: FieldDescriptor::of::<String>("bio").with_tags(TagSettings::parse("type:TEXT")),
            expected: "TEXT",
        },
        Column {
            field: FieldDescriptor::of::<Option<bool>>("verified")
                .with_tags(TagSettings::parse("default:false")),
            expected: "BOOLEAN DEFAULT false",
        },
        Column {
            field: FieldDescriptor::of::<DateTime<Utc>>("created_at"),
            expected: "TIMESTAMP",
        },
        Column {
            field: FieldDescriptor::of::<i64>("visits"),
            expected: "BIGINT",
        },
    ]
}

#[test]
fn test_model_columns() {
    let dialect = GenericDialect::new();
    for column in user_columns() {
        assert_eq!(
            dialect.data_type_of(&column.field).unwrap(),
            column.expected,
            "column {}",
            column.field.name
        );
    }
}

#[test]
fn test_map_field_has_no_generic_type() {
    let field = FieldDescriptor::of::<HashMap<String, String>>("attributes");
    let err = GenericDialect::new().data_type_of(&field).unwrap_err();
    assert!(matches!(err, DialectError::TypeMapping { ref field_kind, .. } if field_kind == "map"));
    assert!(err.to_string().contains("(map)"));
}

#[test]
fn test_same_field_through_registry() {
    let registry = DialectRegistry::with_builtin();
    let field = FieldDescriptor::new("payload", FieldKind::Bytes).size(32);

    let common = registry.get("common").unwrap();
    let postgres = registry.get("postgres").unwrap();
    assert_eq!(common.data_type_of(&field).unwrap(), "BINARY(32)");
    assert_eq!(postgres.data_type_of(&field).unwrap(), "BYTEA");
}

#[test]
fn test_pagination_through_dialect() {
    let dialect = GenericDialect::new();
    assert_eq!(
        dialect.limit_and_offset_sql(PageValue::from(10_i64), PageValue::from(0_i64)),
        " LIMIT 10"
    );
    assert_eq!(
        dialect.limit_and_offset_sql(PageValue::Absent, PageValue::from("5")),
        " OFFSET 5"
    );
    assert_eq!(
        dialect.limit_and_offset_sql(PageValue::from(Some(25_u32)), PageValue::from(50_u64)),
        " LIMIT 25 OFFSET 50"
    );
}
