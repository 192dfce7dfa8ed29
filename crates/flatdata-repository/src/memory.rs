//! In-memory repository
//!
//! Holds repositories as already-parsed values. Useful for tests and for
//! embedding data that never touches disk.

use async_trait::async_trait;
use flatdata_core::Value;
use std::collections::BTreeMap;

use crate::{error::RepositoryError, traits::Repository, RepositoryResult};

/// Repository backed by a name → value map
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    repositories: BTreeMap<String, Value>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository (builder style)
    pub fn with_repository(mut self, name: impl Into<String>, content: Value) -> Self {
        self.insert(name, content);
        self
    }

    /// Add or replace a repository
    pub fn insert(&mut self, name: impl Into<String>, content: Value) {
        self.repositories.insert(name.into(), content);
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn load_raw(&self, name: &str) -> RepositoryResult<Value> {
        self.repositories
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                name: name.to_string(),
                path: format!("memory://{}", name),
            })
    }

    async fn list_repository_names(&self) -> RepositoryResult<Vec<String>> {
        Ok(self.repositories.keys().cloned().collect())
    }

    async fn exists(&self, name: &str) -> RepositoryResult<bool> {
        Ok(self.repositories.contains_key(name))
    }

    fn extension(&self) -> &str {
        "memory"
    }
}
