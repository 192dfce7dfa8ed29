//! Cache gateway for hydrated record sets
//!
//! Serializes record sets to YAML and hands the bytes to an optional
//! [`DataCache`]. YAML carries every value a repository file can hold,
//! non-finite floats included. Cache failures never reach the caller: they
//! are logged and treated as a miss.

use flatdata_core::RecordSet;
use flatdata_repository::DataCache;
use std::sync::Arc;

/// Prefix of every cache key
pub const CACHE_KEY_PREFIX: &str = "flat-data-repository:";

#[derive(Clone, Default)]
pub struct CacheGateway {
    cache: Option<Arc<dyn DataCache>>,
}

impl CacheGateway {
    pub fn new(cache: Option<Arc<dyn DataCache>>) -> Self {
        Self { cache }
    }

    /// Gateway that never hits
    pub fn disabled() -> Self {
        Self { cache: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Cache key for a repository name
    pub fn cache_key(name: &str) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, name)
    }

    /// Cached record set for `name`, if any
    pub async fn fetch(&self, name: &str) -> Option<RecordSet> {
        let cache = self.cache.as_ref()?;
        let key = Self::cache_key(name);

        let bytes = match cache.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!("Cache miss for {}", key);
                return None;
            }
            Err(e) => {
                tracing::warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_yaml::from_slice::<RecordSet>(&bytes) {
            Ok(records) => {
                tracing::debug!("Cache hit for {}", key);
                Some(records)
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Store the hydrated record set for `name`
    pub async fn store(&self, name: &str, records: &RecordSet) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let key = Self::cache_key(name);

        let bytes = match serde_yaml::to_string(records) {
            Ok(text) => text.into_bytes(),
            Err(e) => {
                tracing::warn!("Failed to serialize {} for caching: {}", key, e);
                return;
            }
        };

        if let Err(e) = cache.set(&key, bytes).await {
            tracing::warn!("Cache write failed for {}: {}", key, e);
        }
    }
}

impl std::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheGateway")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
