//! LIMIT / OFFSET clause rendering.
//!
//! Limits and offsets arrive untyped from the query layer: absent, a
//! number, or a string. Anything that reads as a strictly positive integer
//! renders a clause; everything else is skipped without error.

use std::fmt::Write;

/// A limit or offset as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PageValue {
    /// No value.
    #[default]
    Absent,
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Text, parsed as an integer literal.
    Text(String),
}

impl PageValue {
    /// The integer this value reads as, if any.
    ///
    /// Text accepts an optional sign, `0x`/`0o`/`0b` prefixes, a leading
    /// `0` for octal, and `_` between digits. Floats read as integers only
    /// when they have no fractional part.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Absent => None,
            Self::Int(n) => Some(*n),
            Self::Uint(n) => i64::try_from(*n).ok(),
            Self::Float(f) => parse_integer(&f.to_string()),
            Self::Text(s) => parse_integer(s),
        }
    }

    /// The value if it is a strictly positive integer.
    #[must_use]
    pub fn positive(&self) -> Option<i64> {
        self.as_integer().filter(|n| *n > 0)
    }
}

macro_rules! page_value_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for PageValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

page_value_from!(Int as i64: i8, i16, i32, i64);
page_value_from!(Uint as u64: u8, u16, u32, u64);
page_value_from!(Float as f64: f32, f64);

impl From<usize> for PageValue {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or(Self::Absent, Self::Uint)
    }
}

impl From<&str> for PageValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PageValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for PageValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Renders ` LIMIT n` and/or ` OFFSET m`, LIMIT first.
#[must_use]
pub fn limit_and_offset(limit: &PageValue, offset: &PageValue) -> String {
    let mut sql = String::new();
    if let Some(limit) = limit.positive() {
        let _ = write!(sql, " LIMIT {limit}");
    }
    if let Some(offset) = offset.positive() {
        let _ = write!(sql, " OFFSET {offset}");
    }
    sql
}

fn parse_integer(text: &str) -> Option<i64> {
    let (negative, body) = match text.as_bytes().first()? {
        b'+' => (false, &text[1..]),
        b'-' => (true, &text[1..]),
        _ => (false, text),
    };

    let prefixed = |lower: &str, upper: &str| {
        body.strip_prefix(lower).or_else(|| body.strip_prefix(upper))
    };
    let (radix, digits, after_prefix) = if let Some(rest) = prefixed("0x", "0X") {
        (16, rest, true)
    } else if let Some(rest) = prefixed("0b", "0B") {
        (2, rest, true)
    } else if let Some(rest) = prefixed("0o", "0O") {
        (8, rest, true)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..], true)
    } else {
        (10, body, false)
    };

    let digits = strip_separators(digits, after_prefix)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let magnitude = u64::from_str_radix(&digits, radix).ok()?;
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(value).ok()
}

/// Removes `_` digit separators, rejecting misplaced ones.
fn strip_separators(digits: &str, after_prefix: bool) -> Option<String> {
    if !digits.contains('_') {
        return Some(digits.to_string());
    }
    let leading_ok = after_prefix || !digits.starts_with('_');
    if !leading_ok || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    Some(digits.replace('_', ""))
}
