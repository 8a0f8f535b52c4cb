//! Field tag settings.
//!
//! Model fields carry their persistence options as a tag string such as
//! `type:varchar(100);not null;auto_increment`. Keys are case-insensitive
//! and stored upper-cased.

use std::collections::BTreeMap;

/// Tag key marking an auto-incrementing column.
pub const AUTO_INCREMENT: &str = "AUTO_INCREMENT";

/// Parsed tag settings of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSettings {
    settings: BTreeMap<String, String>,
}

impl TagSettings {
    /// Creates empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `;`-separated tag string.
    ///
    /// Each entry is `key` or `key:value`. Only the first `:` separates key
    /// from value. A bare key maps to itself, so `not null` yields
    /// `NOT NULL => "NOT NULL"`.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let mut settings = BTreeMap::new();
        for entry in tag.split(';') {
            let (key, value) = match entry.split_once(':') {
                Some((key, value)) => (key.trim().to_uppercase(), value.trim().to_string()),
                None => {
                    let key = entry.trim().to_uppercase();
                    (key.clone(), key)
                }
            };
            if key.is_empty() {
                continue;
            }
            settings.insert(key, value);
        }
        Self { settings }
    }

    /// Sets a key (upper-cased) to a value.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.settings
            .insert(key.as_ref().trim().to_uppercase(), value.into());
    }

    /// Returns the value of a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(&key.to_uppercase()).map(String::as_str)
    }

    /// Returns whether a key is present, whatever its value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.settings.contains_key(&key.to_uppercase())
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Returns whether there are no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for TagSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (key, value) in iter {
            tags.insert(key, value);
        }
        tags
    }
}
