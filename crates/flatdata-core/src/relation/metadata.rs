//! Relation provenance metadata
//!
//! Hydration records which fields it populated in a `_relation_properties`
//! sequence on each touched record. Staging reads it back to find the
//! one-to-one relations it may collapse.

use super::declaration::RelationType;
use crate::types::{RecordSet, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Record field holding the provenance list
pub const RELATION_PROPERTIES_FIELD: &str = "_relation_properties";

/// Which side declared the relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationSource {
    /// Declared by the record that holds the field
    Local,
    /// Declared by another repository through `foreign_alias`
    Foreign,
}

impl RelationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationSource::Local => "local",
            RelationSource::Foreign => "foreign",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "local" => Some(RelationSource::Local),
            "foreign" => Some(RelationSource::Foreign),
            _ => None,
        }
    }
}

/// One `_relation_properties` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationProperty {
    /// Field populated by hydration
    pub property: String,
    pub source: RelationSource,
    /// Declared cardinality; only local relations carry one
    pub relation_type: Option<RelationType>,
}

impl RelationProperty {
    pub fn local(property: impl Into<String>, relation_type: RelationType) -> Self {
        Self {
            property: property.into(),
            source: RelationSource::Local,
            relation_type: Some(relation_type),
        }
    }

    pub fn foreign(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            source: RelationSource::Foreign,
            relation_type: None,
        }
    }

    pub fn to_value(&self) -> Value {
        let mut map = IndexMap::new();
        map.insert("property".to_string(), Value::from(self.property.as_str()));
        map.insert("source".to_string(), Value::from(self.source.as_str()));
        if let Some(relation_type) = self.relation_type {
            map.insert("type".to_string(), Value::from(relation_type.as_str()));
        }
        Value::Object(map)
    }

    /// Read an entry back; entries of an unexpected shape yield `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        let property = value.get("property")?.as_str()?.to_string();
        let source = RelationSource::parse(value.get("source")?.as_str()?)?;
        let relation_type = value
            .get("type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok());

        Some(Self {
            property,
            source,
            relation_type,
        })
    }
}

/// Append an entry to a record's provenance list
///
/// An entry with the same property and source is recorded once.
pub fn push_relation_property(record: &mut RecordSet, entry: RelationProperty) {
    let slot = record
        .entry(RELATION_PROPERTIES_FIELD.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));

    if !matches!(slot, Value::Array(_)) {
        *slot = Value::Array(Vec::new());
    }

    if let Value::Array(entries) = slot {
        let duplicate = entries.iter().filter_map(RelationProperty::from_value).any(|existing| {
            existing.property == entry.property && existing.source == entry.source
        });
        if !duplicate {
            entries.push(entry.to_value());
        }
    }
}

/// Provenance entries recorded on a record
pub fn relation_properties(record: &RecordSet) -> Vec<RelationProperty> {
    match record.get(RELATION_PROPERTIES_FIELD) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(RelationProperty::from_value)
            .collect(),
        _ => Vec::new(),
    }
}
