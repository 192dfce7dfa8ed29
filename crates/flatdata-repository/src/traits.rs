//! Core trait definitions for the repository pattern
//!
//! This module defines the two collaborators the query engine relies on:
//!
//! - [`Repository`]: read-only access to named repositories
//! - [`DataCache`]: opaque byte storage for fully hydrated record sets
//!
//! # Examples
//!
//! ```no_run
//! use flatdata_repository::{FileSystemRepository, Repository, YamlParser};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let repo = FileSystemRepository::new("data", Box::new(YamlParser))?;
//!
//! // Every `<name>.yml` in the directory is a repository
//! for name in repo.list_repository_names().await? {
//!     let raw = repo.load_raw(&name).await?;
//!     println!("{}: {} records", name, raw.len());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use flatdata_core::Value;

use crate::RepositoryResult;

/// Read-only access to a set of named repositories
///
/// # Implementation Notes
///
/// - Every call re-reads the backing store; there is no caching at this layer
/// - A missing repository fails with [`RepositoryError::NotFound`](crate::RepositoryError::NotFound)
/// - Listing returns names without extension, sorted
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so one instance can back many cursors.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Load the raw content of a repository
    ///
    /// # Arguments
    /// * `name` - Repository name (file name without extension)
    async fn load_raw(&self, name: &str) -> RepositoryResult<Value>;

    /// List the names of all available repositories
    async fn list_repository_names(&self) -> RepositoryResult<Vec<String>>;

    /// Check if a repository exists
    async fn exists(&self, name: &str) -> RepositoryResult<bool>;

    /// Extension of the repository files handled by this repository
    fn extension(&self) -> &str;
}

/// Byte store for hydrated record sets
///
/// The engine owns serialization; a cache only keeps opaque bytes under
/// string keys. No expiry or invalidation is expected.
#[async_trait]
pub trait DataCache: Send + Sync {
    /// Fetch the entry stored under `key`, if any
    async fn get(&self, key: &str) -> RepositoryResult<Option<Vec<u8>>>;

    /// Store `data` under `key`, replacing any previous entry
    async fn set(&self, key: &str, data: Vec<u8>) -> RepositoryResult<()>;
}
