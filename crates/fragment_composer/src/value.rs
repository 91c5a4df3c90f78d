//! Scalar option values.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;

/// A single configuration value carried by a fragment.
///
/// Deserializes from the plain TOML/JSON value, so `true`, `8`, `7.0` and
/// `"JRE"` map to `Boolean`, `Integer`, `Float` and `String` respectively.
///
/// # Examples
///
/// ```rust
/// use fragment_composer::OptionValue;
///
/// let value: OptionValue = "JRE".into();
/// assert_eq!(value.as_str(), Some("JRE"));
/// assert_eq!(OptionValue::from(8).to_string(), "8");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl OptionValue {
    /// Returns the string content if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// `false` only for NaN and infinite floats.
    pub fn is_finite(&self) -> bool {
        match self {
            OptionValue::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    /// Converts the value into JSON for use as a placeholder context.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            OptionValue::Boolean(b) => serde_json::Value::Bool(*b),
            OptionValue::Integer(i) => serde_json::Value::from(*i),
            OptionValue::Float(f) => serde_json::Value::from(*f),
            OptionValue::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Boolean(b) => write!(f, "{}", b),
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Float(v) => write!(f, "{:?}", v),
            OptionValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Boolean(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Integer(i64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}
