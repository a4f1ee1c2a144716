//! Key-value context carried alongside the record message

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One context value. Scalars only; anything nested belongs in the message
/// or in one field per leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// JSON view of the value, for sinks that emit structured lines. Falls
    /// back to null for a non-finite float.
    pub fn as_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

macro_rules! field_value_from_int {
    ($($ty:ty),+) => {
        $(impl From<$ty> for FieldValue {
            fn from(n: $ty) -> Self {
                FieldValue::Int(i64::from(n))
            }
        })+
    };
}

field_value_from_int!(i64, i32, i16, u32, u16);

/// Caller-supplied context attached to a record.
///
/// Stored ordered by key so the formatted output is deterministic; insertion
/// order carries no meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogFields {
    fields: BTreeMap<String, FieldValue>,
}

impl LogFields {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, builder style
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field in place
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Render as compact `key=value` pairs for line output
    pub fn format_fields(&self) -> String {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::from("abc").to_string(), "abc");
        assert_eq!(FieldValue::from(42).to_string(), "42");
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }

    #[test]
    fn test_format_fields_deterministic() {
        let fields = LogFields::new()
            .with_field("zeta", 1)
            .with_field("alpha", "x");
        assert_eq!(fields.format_fields(), "alpha=x zeta=1");
    }

    #[test]
    fn test_json_view() {
        assert_eq!(FieldValue::from(3.5).as_json(), serde_json::json!(3.5));
        assert_eq!(FieldValue::from("x").as_json(), serde_json::json!("x"));
        assert!(FieldValue::Float(f64::NAN).as_json().is_null());
        assert!(FieldValue::Null.as_json().is_null());
    }
}
