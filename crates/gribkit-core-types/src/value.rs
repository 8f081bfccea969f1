//! Typed field values
//!
//! A message handle exposes its fields as one of a small set of native
//! types. The same representation is produced by the filter expression
//! parser and consumed by the concept resolver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Native type of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Type not known in advance; detected from the text
    Undefined,
    Long,
    Double,
    String,
    /// The field is explicitly set to missing
    Missing,
}

impl ValueType {
    /// Map a one-letter type suffix (`key:l`, `key:d`, `key:s`) to a type.
    ///
    /// Unknown letters map to `Undefined`.
    pub fn from_suffix(c: char) -> Self {
        match c {
            'l' | 'i' => ValueType::Long,
            'd' | 'f' => ValueType::Double,
            's' => ValueType::String,
            _ => ValueType::Undefined,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Undefined => "undefined",
            ValueType::Long => "long",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Missing => "missing",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed field value
///
/// Deserializes untagged so rule tables can write `1`, `0.5`, `"instant"` or `~`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Long(i64),
    Double(f64),
    Str(String),
    Missing,
}

impl FieldValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            FieldValue::Long(_) => ValueType::Long,
            FieldValue::Double(_) => ValueType::Double,
            FieldValue::Str(_) => ValueType::String,
            FieldValue::Missing => ValueType::Missing,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            FieldValue::Long(v) => Some(*v),
            FieldValue::Double(v) if v.fract() == 0.0 => Some(*v as i64),
            FieldValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            FieldValue::Long(v) => Some(*v as f64),
            FieldValue::Double(v) => Some(*v),
            FieldValue::Str(s) => s.trim().parse().ok(),
            FieldValue::Missing => None,
        }
    }

    /// Compare two values the way a message compares a key against a literal.
    ///
    /// Numbers compare numerically across integer and floating types; a string
    /// compares equal to a number when it parses to that number.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Missing, FieldValue::Missing) => true,
            (FieldValue::Missing, _) | (_, FieldValue::Missing) => false,
            (FieldValue::Str(a), FieldValue::Str(b)) => a == b,
            (FieldValue::Long(a), FieldValue::Long(b)) => a == b,
            (a, b) => match (a.as_double(), b.as_double()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Long(v) => write!(f, "{}", v),
            FieldValue::Double(v) => write!(f, "{}", v),
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Missing => f.write_str("missing"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Long(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Long(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Double(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}
