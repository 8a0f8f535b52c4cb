//! # oxide-dialect
//!
//! Database dialect adapters for the ORM layer.
//!
//! A [`Dialect`] translates database-agnostic schema and query questions
//! into engine-specific answers:
//! - which column type represents a model field ([`Dialect::data_type_of`])
//! - how identifiers are quoted and parameters are written
//! - how LIMIT/OFFSET is expressed
//! - how foreign key constraints are named
//! - whether a table, column, index or foreign key already exists
//!
//! [`GenericDialect`] is the baseline implementation; engine-specific
//! dialects such as [`PostgresDialect`] compose it and override what differs.
//!
//! ## Type mapping
//!
//! ```rust
//! use oxide_dialect::{Dialect, FieldDescriptor, GenericDialect, TagSettings};
//!
//! let dialect = GenericDialect::new();
//!
//! let id = FieldDescriptor::of::<i64>("id").auto_increment();
//! assert_eq!(dialect.data_type_of(&id).unwrap(), "BIGINT AUTO_INCREMENT");
//!
//! let email = FieldDescriptor::of::<String>("email")
//!     .with_tags(TagSettings::parse("size:120;not null;unique"));
//! assert_eq!(dialect.data_type_of(&email).unwrap(), "VARCHAR(120) NOT NULL UNIQUE");
//! ```
//!
//! ## Introspection
//!
//! Existence checks run through a [`SqlConnection`] attached with
//! [`Dialect::set_connection`]. They never fail: a query that cannot run
//! reports the object as absent, and the failure is logged with `tracing`.
//! [`Dialect::remove_index`] is the one I/O operation that returns errors.

pub mod config;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod field;
pub mod naming;
pub mod pagination;
pub mod registry;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod tags;
pub mod value;

pub use config::ConnectionConfig;
pub use connection::{ExecResult, Row, SharedConnection, SqlConnection};
pub use dialect::{Dialect, GenericDialect, PostgresDialect};
pub use error::{DialectError, Result};
pub use field::{FieldDescriptor, FieldKind, FieldType, StructKind};
pub use naming::{DefaultForeignKeyNamer, ForeignKeyNamer};
pub use pagination::PageValue;
pub use registry::DialectRegistry;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteConnection;
pub use tags::TagSettings;
pub use value::{FromSqlValue, SqlValue, ToSqlValue};
