//! Query cursor
//!
//! A cursor walks one query chain: select a repository, optionally filter
//! it or pick a record, then drill into properties. Every step consumes the
//! cursor and returns the next one, so a cursor value always describes
//! exactly one state.
//!
//! ```text
//! Empty ─get_repository→ RepositorySelected ─filter→ Filtered ─filter→ Filtered
//!                               │                       │
//!                               └──────get_record───────┴→ RecordSelected
//!                                                              │
//!                                               get_property → PropertySelected ─┐
//!                                                                  ↑ get_property┘
//! ```

use flatdata_core::{is_relation_declaration, FilterOperator, RecordId, RecordSet, RelationDeclaration, Value};

use crate::engine::FlatDataEngine;
use crate::error::{Result, SdkError};

#[derive(Debug, Clone)]
enum CursorState {
    Empty,
    RepositorySelected {
        repository: String,
        records: RecordSet,
    },
    Filtered {
        repository: String,
        records: RecordSet,
        filtered: RecordSet,
    },
    RecordSelected {
        repository: String,
        id: RecordId,
        record: Value,
    },
    PropertySelected {
        repository: String,
        id: RecordId,
        path: Vec<String>,
        value: Value,
    },
}

impl CursorState {
    fn name(&self) -> &'static str {
        match self {
            CursorState::Empty => "Empty",
            CursorState::RepositorySelected { .. } => "RepositorySelected",
            CursorState::Filtered { .. } => "Filtered",
            CursorState::RecordSelected { .. } => "RecordSelected",
            CursorState::PropertySelected { .. } => "PropertySelected",
        }
    }
}

/// One query chain over a [`FlatDataEngine`]
#[derive(Clone)]
pub struct QueryCursor<'a> {
    engine: &'a FlatDataEngine,
    state: CursorState,
}

impl<'a> QueryCursor<'a> {
    pub(crate) fn new(engine: &'a FlatDataEngine) -> Self {
        Self {
            engine,
            state: CursorState::Empty,
        }
    }

    fn with_state(self, state: CursorState) -> Self {
        Self {
            engine: self.engine,
            state,
        }
    }

    fn invalid(&self, operation: &'static str) -> SdkError {
        SdkError::InvalidStateTransition {
            operation,
            state: self.state.name(),
        }
    }

    /// Select a repository, discarding any previous selection
    pub async fn get_repository(self, name: &str) -> Result<Self> {
        let records = self.engine.hydrated_repository(name).await?;

        Ok(self.with_state(CursorState::RepositorySelected {
            repository: name.to_string(),
            records,
        }))
    }

    /// Select one record of the repository (or of the filtered set)
    pub fn get_record(self, id: impl Into<RecordId>) -> Result<Self> {
        let id = id.into();

        let (repository, source) = match &self.state {
            CursorState::RepositorySelected {
                repository,
                records,
            } => (repository, records),
            CursorState::Filtered {
                repository,
                filtered,
                ..
            } => (repository, filtered),
            _ => return Err(self.invalid("get_record")),
        };

        let record = source
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| SdkError::RecordNotFound {
                record: id.to_string(),
                repository: repository.clone(),
            })?;
        let repository = repository.clone();

        Ok(self.with_state(CursorState::RecordSelected {
            repository,
            id,
            record,
        }))
    }

    /// Step into a property of the current record or property
    ///
    /// Mappings are indexed by key and sequences by position. A property
    /// that is itself a relation declaration is resolved on the spot.
    pub async fn get_property(self, name: &str) -> Result<Self> {
        let (repository, id, mut path, current) = match &self.state {
            CursorState::RecordSelected {
                repository,
                id,
                record,
            } => (repository, id, Vec::new(), record),
            CursorState::PropertySelected {
                repository,
                id,
                path,
                value,
            } => (repository, id, path.clone(), value),
            _ => return Err(self.invalid("get_property")),
        };

        let Some(found) = current.get(name) else {
            let owner = std::iter::once(id.to_string())
                .chain(path)
                .collect::<Vec<_>>()
                .join(".");
            return Err(SdkError::PropertyNotFound {
                property: name.to_string(),
                record: owner,
            });
        };

        let mut value = found.clone();
        if is_relation_declaration(&value) {
            if let Some(declaration) = RelationDeclaration::parse(&value)? {
                tracing::debug!(
                    "Following relation {}.{} -> {}",
                    id,
                    name,
                    declaration.repository
                );
                value = Value::Object(self.engine.resolve_declaration(&declaration).await?);
            }
        }

        path.push(name.to_string());
        let repository = repository.clone();
        let id = id.clone();

        Ok(self.with_state(CursorState::PropertySelected {
            repository,
            id,
            path,
            value,
        }))
    }

    /// Keep the records whose `field` satisfies `operator value`
    ///
    /// `operator` is one of `==`, `===`, `!=`, `!==`, `<`, `<=`, `>`, `>=`.
    pub fn filter(self, field: &str, operator: &str, value: impl Into<Value>) -> Result<Self> {
        let operator: FilterOperator = operator.parse()?;
        self.filter_with(field, operator, value)
    }

    /// Like [`filter`](Self::filter) with an already parsed operator
    ///
    /// Each call filters the full repository again; the previous filter is
    /// replaced, not narrowed.
    pub fn filter_with(
        self,
        field: &str,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let value = value.into();

        let (repository, records) = match self.state {
            CursorState::RepositorySelected {
                repository,
                records,
            }
            | CursorState::Filtered {
                repository,
                records,
                ..
            } => (repository, records),
            CursorState::RecordSelected { .. } | CursorState::PropertySelected { .. } => {
                return Err(SdkError::AlreadyScopedToRecord)
            }
            CursorState::Empty => {
                return Err(SdkError::InvalidStateTransition {
                    operation: "filter",
                    state: "Empty",
                })
            }
        };

        let filtered: RecordSet = records
            .iter()
            .filter(|(_, record)| {
                let left = record
                    .as_object()
                    .and_then(|fields| fields.get(field))
                    .unwrap_or(&Value::Null);
                operator.evaluate(left, &value)
            })
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect();

        tracing::debug!(
            "Filter {} {} {} on {}: {} of {} records",
            field,
            operator,
            serde_json::to_string(&value).unwrap_or_default(),
            repository,
            filtered.len(),
            records.len()
        );

        Ok(Self {
            engine: self.engine,
            state: CursorState::Filtered {
                repository,
                records,
                filtered,
            },
        })
    }

    /// Result of the chain
    ///
    /// The selected property, else the selected record, else the filtered
    /// records, else the whole repository. `None` before any selection.
    pub fn execute(&self) -> Option<Value> {
        match &self.state {
            CursorState::Empty => None,
            CursorState::RepositorySelected { records, .. } => Some(Value::Object(records.clone())),
            CursorState::Filtered { filtered, .. } => Some(Value::Object(filtered.clone())),
            CursorState::RecordSelected { record, .. } => Some(record.clone()),
            CursorState::PropertySelected { value, .. } => Some(value.clone()),
        }
    }

    /// Name of the current state
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    pub fn repository_name(&self) -> Option<&str> {
        match &self.state {
            CursorState::Empty => None,
            CursorState::RepositorySelected { repository, .. }
            | CursorState::Filtered { repository, .. }
            | CursorState::RecordSelected { repository, .. }
            | CursorState::PropertySelected { repository, .. } => Some(repository),
        }
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        match &self.state {
            CursorState::RecordSelected { id, .. } | CursorState::PropertySelected { id, .. } => {
                Some(id)
            }
            _ => None,
        }
    }

    /// Property names followed from the current record
    pub fn property_path(&self) -> &[String] {
        match &self.state {
            CursorState::PropertySelected { path, .. } => path,
            _ => &[],
        }
    }
}

impl std::fmt::Debug for QueryCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCursor")
            .field("state", &self.state_name())
            .field("repository", &self.repository_name())
            .field("record", &self.record_id())
            .finish()
    }
}
