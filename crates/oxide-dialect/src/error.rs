//! Error types for dialect operations.

/// Errors that can occur while mapping types or talking to the database.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// No SQL type rule matched the field and no explicit type was given.
    #[error("Invalid SQL type {field_type} ({field_kind}) for dialect")]
    TypeMapping {
        /// Name of the field's Rust type.
        field_type: String,
        /// Name of the field's kind.
        field_kind: String,
    },

    /// The connection failed to run a statement.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Database error from sqlx.
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The blocking runtime could not be created.
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// An operation needed a connection but none was attached.
    #[error("No connection attached to dialect")]
    NoConnection,

    /// A single-row query returned nothing.
    #[error("Query returned no rows")]
    NoRows,

    /// A column could not be read as the requested type.
    #[error("Cannot scan column {index} as {expected}: found {found}")]
    Scan {
        /// Zero-based column index.
        index: usize,
        /// Requested Rust type.
        expected: &'static str,
        /// What the column actually held.
        found: String,
    },
}

/// Result type alias for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
