//! Lookup of dialects by name.

use std::collections::BTreeMap;

use crate::dialect::{Dialect, GenericDialect, PostgresDialect};

/// Builds a fresh, unconnected dialect.
pub type DialectFactory = fn() -> Box<dyn Dialect>;

/// Maps dialect names to factories.
///
/// The registry is owned by whoever sets up the ORM; there is no global
/// instance.
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    factories: BTreeMap<String, DialectFactory>,
}

impl DialectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in dialects.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("common", || Box::new(GenericDialect::new()));
        registry.register("postgres", || Box::new(PostgresDialect::new()));
        registry
    }

    /// Registers a factory under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, factory: DialectFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Builds the dialect registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Box<dyn Dialect>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}
