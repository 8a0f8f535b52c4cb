//! Field descriptors: the persistence metadata of one model field.
//!
//! A descriptor is what the model layer hands a dialect when it asks for a
//! column type. It records the field's underlying kind, an optional explicit
//! SQL type, a declared size, an additional type modifier (such as
//! `NOT NULL`) and the field's tag settings.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::tags::{TagSettings, AUTO_INCREMENT};

/// Size assumed for a field whose tags do not declare one.
pub const DEFAULT_TAG_SIZE: usize = 255;

/// The underlying kind of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `bool`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `isize`.
    Isize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// Text.
    String,
    /// A struct value.
    Struct(StructKind),
    /// A byte sequence.
    Bytes,
    /// A sequence of anything other than bytes.
    Slice,
    /// A key/value map.
    Map,
    /// Anything else.
    Other,
}

/// What a struct-kinded field represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructKind {
    /// A point in time.
    Timestamp,
    /// Any other struct.
    Plain,
}

impl FieldKind {
    /// Name of the kind, as reported in type mapping errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
            Self::Struct(_) => "struct",
            Self::Bytes => "bytes",
            Self::Slice => "slice",
            Self::Map => "map",
            Self::Other => "other",
        }
    }

    /// Integers of at most 32 bits, plus the word-sized ones.
    #[must_use]
    pub const fn is_small_integer(&self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::Usize
        )
    }

    /// 64-bit integers.
    #[must_use]
    pub const fn is_big_integer(&self) -> bool {
        matches!(self, Self::I64 | Self::U64)
    }

    /// Floating point numbers.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rust types that know which [`FieldKind`] they persist as.
pub trait FieldType {
    /// The kind of this type.
    fn field_kind() -> FieldKind;
}

macro_rules! field_type {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn field_kind() -> FieldKind {
                    $kind
                }
            }
        )*
    };
}

field_type! {
    bool => FieldKind::Bool,
    i8 => FieldKind::I8,
    i16 => FieldKind::I16,
    i32 => FieldKind::I32,
    i64 => FieldKind::I64,
    isize => FieldKind::Isize,
    u8 => FieldKind::U8,
    u16 => FieldKind::U16,
    u32 => FieldKind::U32,
    u64 => FieldKind::U64,
    usize => FieldKind::Usize,
    f32 => FieldKind::F32,
    f64 => FieldKind::F64,
    String => FieldKind::String,
    Vec<u8> => FieldKind::Bytes,
    NaiveDateTime => FieldKind::Struct(StructKind::Timestamp),
    SystemTime => FieldKind::Struct(StructKind::Timestamp),
}

impl<Tz: TimeZone> FieldType for DateTime<Tz> {
    fn field_kind() -> FieldKind {
        FieldKind::Struct(StructKind::Timestamp)
    }
}

impl<K, V, S> FieldType for HashMap<K, V, S> {
    fn field_kind() -> FieldKind {
        FieldKind::Map
    }
}

impl<K, V> FieldType for BTreeMap<K, V> {
    fn field_kind() -> FieldKind {
        FieldKind::Map
    }
}

// Nullable fields persist as their inner type.
impl<T: FieldType> FieldType for Option<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

/// Persistence metadata of one model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Name of the field's Rust type.
    pub type_name: String,
    /// Underlying kind.
    pub kind: FieldKind,
    /// Explicit SQL type; bypasses inference when set.
    pub sql_type: Option<String>,
    /// Declared size; 0 means unspecified.
    pub size: usize,
    /// Modifier appended after the type, e.g. `NOT NULL`.
    pub additional_type: String,
    /// Tag settings.
    pub tag_settings: TagSettings,
}

impl FieldDescriptor {
    /// Creates a descriptor for a field of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            type_name: kind.as_str().to_string(),
            kind,
            sql_type: None,
            size: 0,
            additional_type: String::new(),
            tag_settings: TagSettings::new(),
        }
    }

    /// Creates a descriptor for a field of Rust type `T`.
    #[must_use]
    pub fn of<T: FieldType>(name: impl Into<String>) -> Self {
        let mut field = Self::new(name, T::field_kind());
        field.type_name = std::any::type_name::<T>().to_string();
        field
    }

    /// Overrides the Rust type name.
    #[must_use]
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Sets an explicit SQL type.
    #[must_use]
    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    /// Sets the declared size.
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the additional type modifier.
    #[must_use]
    pub fn additional_type(mut self, additional_type: impl Into<String>) -> Self {
        self.additional_type = additional_type.into();
        self
    }

    /// Adds a single tag setting.
    #[must_use]
    pub fn tag_setting(mut self, key: &str, value: impl Into<String>) -> Self {
        self.tag_settings.insert(key, value);
        self
    }

    /// Marks the field as auto-incrementing.
    #[must_use]
    pub fn auto_increment(self) -> Self {
        self.tag_setting(AUTO_INCREMENT, AUTO_INCREMENT)
    }

    /// Applies tag settings the way the model layer reads them.
    ///
    /// `TYPE` becomes the explicit SQL type. `SIZE` becomes the size (0 if
    /// unparseable, [`DEFAULT_TAG_SIZE`] if absent). `NOT NULL`, `UNIQUE`
    /// and `DEFAULT` build the additional type modifier.
    #[must_use]
    pub fn with_tags(mut self, tags: TagSettings) -> Self {
        if let Some(sql_type) = tags.get("TYPE") {
            self.sql_type = Some(sql_type.to_string());
        }

        self.size = tags
            .get("SIZE")
            .map_or(DEFAULT_TAG_SIZE, |size| size.trim().parse().unwrap_or(0));

        let mut additional = format!(
            "{} {}",
            tags.get("NOT NULL").unwrap_or_default(),
            tags.get("UNIQUE").unwrap_or_default()
        );
        if let Some(default) = tags.get("DEFAULT") {
            additional.push_str(" DEFAULT ");
            additional.push_str(default);
        }
        self.additional_type = additional.trim().to_string();

        self.tag_settings = tags;
        self
    }

    /// Returns whether the auto-increment tag is present.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.tag_settings.contains(AUTO_INCREMENT)
    }

    /// The explicit SQL type, if one is set and non-empty.
    #[must_use]
    pub fn explicit_sql_type(&self) -> Option<&str> {
        self.sql_type.as_deref().filter(|sql_type| !sql_type.is_empty())
    }
}
