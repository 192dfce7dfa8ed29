//! Record identifiers and record sets

use crate::types::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All records of one repository, keyed by record id
pub type RecordSet = IndexMap<String, Value>;

/// Record identifier
///
/// Repositories may be keyed by strings or integers; relation declarations
/// reference ids either way. Ids are normalised to their string form, so
/// `5` and `"5"` name the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Read an id out of a declaration's `values` entry
    ///
    /// Strings and integers qualify, as do floats with no fractional part.
    /// Booleans, null and containers do not name a record.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Integer(i) => Some(Self(i.to_string())),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
                Some(Self((*f as i64).to_string()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for RecordId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<usize> for RecordId {
    fn from(id: usize) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_string_ids_are_equal() {
        assert_eq!(RecordId::from(5), RecordId::from("5"));
        assert_eq!(
            RecordId::from_value(&Value::Integer(7)),
            Some(RecordId::from("7"))
        );
    }

    #[test]
    fn test_from_value_floats() {
        assert_eq!(
            RecordId::from_value(&Value::Float(3.0)),
            Some(RecordId::from(3))
        );
        assert_eq!(RecordId::from_value(&Value::Float(3.5)), None);
    }

    #[test]
    fn test_from_value_rejects_non_ids() {
        assert_eq!(RecordId::from_value(&Value::Bool(true)), None);
        assert_eq!(RecordId::from_value(&Value::Null), None);
        assert_eq!(RecordId::from_value(&Value::Array(vec![])), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordId::new("mr_admin").to_string(), "mr_admin");
    }
}
