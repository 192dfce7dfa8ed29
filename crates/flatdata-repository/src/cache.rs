//! Byte caches for hydrated repositories
//!
//! Two [`DataCache`] backends are provided:
//!
//! - [`MemoryCache`]: process-local map, with hit/miss statistics
//! - [`FileCache`]: one file per key inside an existing directory

use async_trait::async_trait;
use path_absolutize::Absolutize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tokio::sync::RwLock;

use crate::{error::RepositoryError, models::CacheStats, traits::DataCache, RepositoryResult};

/// In-memory cache
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    stats: Mutex<CacheStats>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    /// Drop every entry and reset the statistics
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        if let Ok(mut stats) = self.stats.lock() {
            *stats = CacheStats::default();
        }
    }

    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            update(&mut stats);
        }
    }
}

#[async_trait]
impl DataCache for MemoryCache {
    async fn get(&self, key: &str) -> RepositoryResult<Option<Vec<u8>>> {
        let found = self.entries.read().await.get(key).cloned();

        match &found {
            Some(_) => {
                tracing::trace!("Memory cache hit: {}", key);
                self.record(|s| s.hits += 1);
            }
            None => {
                tracing::trace!("Memory cache miss: {}", key);
                self.record(|s| s.misses += 1);
            }
        }

        Ok(found)
    }

    async fn set(&self, key: &str, data: Vec<u8>) -> RepositoryResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), data);

        let size = entries.len();
        let memory_bytes = entries.values().map(Vec::len).sum();
        self.record(|s| {
            s.size = size;
            s.memory_bytes = memory_bytes;
        });

        Ok(())
    }
}

/// File backed cache
///
/// Each key is stored as `<sanitized key>.cache` in the cache directory.
/// The directory must already exist.
#[derive(Debug, Clone)]
pub struct FileCache {
    directory: PathBuf,
}

impl FileCache {
    pub fn new<P: AsRef<Path>>(directory: P) -> RepositoryResult<Self> {
        let path = directory.as_ref();

        if !path.is_dir() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let directory = path
            .absolutize()
            .map_err(|_| RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            })?
            .to_path_buf();

        tracing::debug!("File cache at {}", directory.display());

        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File that holds the entry for `key`
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.cache", sanitize_key(key)))
    }
}

/// Map a cache key onto a safe file name
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl DataCache for FileCache {
    async fn get(&self, key: &str) -> RepositoryResult<Option<Vec<u8>>> {
        let path = self.entry_path(key);

        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RepositoryError::Cache(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, data: Vec<u8>) -> RepositoryResult<()> {
        let path = self.entry_path(key);

        fs::write(&path, data).await.map_err(|e| {
            RepositoryError::Cache(format!("failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!("Cached '{}' at {}", key, path.display());
        Ok(())
    }
}
