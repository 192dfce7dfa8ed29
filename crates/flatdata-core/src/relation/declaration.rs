//! Relation declaration parsing and resolution

use super::{FOREIGN_ALIAS_KEY, REPOSITORY_KEY, TYPE_KEY, VALUES_KEY};
use crate::error::{CoreError, Result};
use crate::types::{RecordId, RecordSet, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relation cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    /// One-to-one; collapsed to the related record when exactly one resolves
    One,
    /// One-to-many; always kept as an id → record mapping
    #[default]
    Many,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::One => "one",
            RelationType::Many => "many",
        }
    }
}

impl FromStr for RelationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("one") {
            Ok(RelationType::One)
        } else if s.eq_ignore_ascii_case("many") {
            Ok(RelationType::Many)
        } else {
            Err(CoreError::malformed(format!(
                "unknown relation type `{}` (expected `one` or `many`)",
                s
            )))
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed relation declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDeclaration {
    /// Target repository name
    pub repository: String,

    /// Target record ids, in declaration order
    pub values: Vec<RecordId>,

    /// Field the declaring record appears under inside each target record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_alias: Option<String>,

    /// Cardinality, `many` unless declared otherwise
    #[serde(rename = "type", default)]
    pub relation_type: RelationType,
}

impl RelationDeclaration {
    pub fn new(repository: impl Into<String>, values: Vec<RecordId>) -> Self {
        Self {
            repository: repository.into(),
            values,
            foreign_alias: None,
            relation_type: RelationType::Many,
        }
    }

    pub fn with_foreign_alias(mut self, alias: impl Into<String>) -> Self {
        self.foreign_alias = Some(alias.into());
        self
    }

    pub fn with_type(mut self, relation_type: RelationType) -> Self {
        self.relation_type = relation_type;
        self
    }

    /// Read a declaration out of a value
    ///
    /// Returns `Ok(None)` when `value` is not a declaration at all, and
    /// `MalformedRelationDeclaration` when it carries a `repository` key but
    /// the rest of the shape is wrong. Entries of `values` that cannot name a
    /// record are skipped.
    pub fn parse(value: &Value) -> Result<Option<Self>> {
        let map = match value {
            Value::Object(map) => map,
            _ => return Ok(None),
        };

        let repository = match map.get(REPOSITORY_KEY) {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            Some(other) => {
                return Err(CoreError::malformed(format!(
                    "`{}` must be a non-empty string, got {}",
                    REPOSITORY_KEY,
                    other.type_name()
                )))
            }
            None => return Ok(None),
        };

        let values = match map.get(VALUES_KEY) {
            Some(Value::Array(items)) => items.iter().filter_map(RecordId::from_value).collect(),
            Some(Value::Object(items)) => {
                items.values().filter_map(RecordId::from_value).collect()
            }
            Some(other) => {
                return Err(CoreError::malformed(format!(
                    "`{}` of relation to `{}` must be a sequence, got {}",
                    VALUES_KEY,
                    repository,
                    other.type_name()
                )))
            }
            None => {
                return Err(CoreError::malformed(format!(
                    "relation to `{}` has no `{}`",
                    repository, VALUES_KEY
                )))
            }
        };

        let foreign_alias = match map.get(FOREIGN_ALIAS_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(alias)) if alias.is_empty() => None,
            Some(Value::String(alias)) => Some(alias.clone()),
            Some(other) => {
                return Err(CoreError::malformed(format!(
                    "`{}` must be a string, got {}",
                    FOREIGN_ALIAS_KEY,
                    other.type_name()
                )))
            }
        };

        let relation_type = match map.get(TYPE_KEY) {
            None | Some(Value::Null) => RelationType::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(other) => {
                return Err(CoreError::malformed(format!(
                    "`{}` must be a string, got {}",
                    TYPE_KEY,
                    other.type_name()
                )))
            }
        };

        Ok(Some(Self {
            repository,
            values,
            foreign_alias,
            relation_type,
        }))
    }

    /// Returns true if `id` is one of the declared target ids
    pub fn targets(&self, id: &RecordId) -> bool {
        self.values.contains(id)
    }

    /// Select the declared records out of the target repository
    ///
    /// Records keep the target repository's order; ids with no matching
    /// record are dropped.
    pub fn resolve(&self, target: &RecordSet) -> RecordSet {
        target
            .iter()
            .filter(|(id, _)| self.targets(&RecordId::from(id.as_str())))
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }
}
