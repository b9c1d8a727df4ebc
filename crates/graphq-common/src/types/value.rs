//! The property value domain, property keys, timestamps, and the logical
//! type tags used by the schema descriptor (see §3.1 and §6.2.2).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::sync::Arc;

/// A property key.
///
/// A thin `Arc<str>` newtype so cloning a key (common when copying rows)
/// is cheap, mirroring the teacher's own interned-string conventions.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct PropertyKey(Arc<str>);

impl PropertyKey {
    /// Builds a property key from any string-like value.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a plain string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PropertyKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A point in time, stored as milliseconds since the Unix epoch.
///
/// Kept as a thin newtype rather than pulling in a full calendar/timezone
/// crate — comparisons, which are all the engine needs (§4.3.6), are exact
/// integer comparisons.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Builds a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as milliseconds since the Unix epoch.
    #[must_use]
    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

/// A property value.
///
/// The value domain from §3.1: signed integers, floats, booleans, strings,
/// timestamps, null, and homogeneous lists of the above.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A UTF-8 string.
    String(String),
    /// A point in time.
    Timestamp(Timestamp),
    /// The absence of a value.
    Null,
    /// A homogeneous list of values.
    List(Vec<Value>),
}

impl Value {
    /// Returns the value as a string slice, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, if it is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as an `f64`, coercing an integer for the purpose of
    /// numeric comparison. This is the only coercion the value domain
    /// performs — see §4.3.4's "numeric only" comparison rule and the
    /// non-goal excluding general type coercion.
    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a `bool`, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns true if the value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns a stable ordinal string used by `OrderBy` and `Distinct` when
    /// two values are not directly comparable (§4.3.6: "mixed types fall
    /// back to stringified ordinal compare").
    #[must_use]
    pub fn ordinal_string(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::String(s) => s.clone(),
            Value::Timestamp(t) => t.as_millis().to_string(),
            Value::Null => String::new(),
            Value::List(items) => items.iter().map(Value::ordinal_string).collect::<Vec<_>>().join(","),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

/// The logical type tags used by [`crate::schema::Schema`] property shapes.
///
/// Purely descriptive — see §6.2.2: this crate never validates a [`Value`]
/// against a `LogicalType` internally.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum LogicalType {
    /// Matches [`Value::Int`].
    Int,
    /// Matches [`Value::Float`].
    Float,
    /// Matches [`Value::Bool`].
    Boolean,
    /// Matches [`Value::String`].
    String,
    /// Matches [`Value::Timestamp`].
    Timestamp,
    /// Matches a [`Value::List`] of the boxed element type.
    List(Box<LogicalType>),
    /// Matches any value, including null.
    Any,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion_compares_int_and_float() {
        let a = Value::Int(3);
        let b = Value::Float(3.0);
        assert_eq!(a.as_numeric(), b.as_numeric());
    }

    #[test]
    fn ordinal_string_is_stable_for_mixed_types() {
        assert_eq!(Value::Int(5).ordinal_string(), "5");
        assert_eq!(Value::String("5".into()).ordinal_string(), "5");
    }
}
