//! Foreign key constraint naming.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of non-letters (underscores included), or runs of underscores.
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(_*[^a-zA-Z]+_*|_+)").expect("valid separator regex"));

/// Derives constraint names for foreign keys.
pub trait ForeignKeyNamer: Send + Sync {
    /// Builds the constraint name for `table.field` referencing `dest`.
    fn build_foreign_key_name(&self, table: &str, field: &str, dest: &str) -> String;
}

/// Names keys `<table>_<field>_<dest>_foreign`, collapsing every run of
/// non-letters into a single underscore.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultForeignKeyNamer;

impl DefaultForeignKeyNamer {
    /// Creates the default namer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ForeignKeyNamer for DefaultForeignKeyNamer {
    fn build_foreign_key_name(&self, table: &str, field: &str, dest: &str) -> String {
        let key_name = format!("{table}_{field}_{dest}_foreign");
        SEPARATOR_RUNS.replace_all(&key_name, "_").into_owned()
    }
}
