//! Relation declaration detection

use super::REPOSITORY_KEY;
use crate::types::Value;

/// Returns true if `value` itself is a relation declaration
pub fn is_relation_declaration(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.contains_key(REPOSITORY_KEY))
}

/// Returns true if a relation declaration appears anywhere in `value`
///
/// Scalars never match. Children are searched depth-first in insertion order
/// and the search stops at the first declaration found.
pub fn contains_relation_declaration(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.contains_key(REPOSITORY_KEY) || map.values().any(contains_relation_declaration)
        }
        Value::Array(items) => items.iter().any(contains_relation_declaration),
        _ => false,
    }
}

/// Copy a record without the fields that carry relation declarations
///
/// Any top-level field whose value contains a declaration at any depth is
/// dropped. Non-mapping values are returned unchanged.
pub fn strip_relation_declarations(record: &Value) -> Value {
    match record {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, value)| !contains_relation_declaration(value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
