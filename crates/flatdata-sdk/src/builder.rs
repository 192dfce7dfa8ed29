//! Builder pattern for FlatDataEngine

use flatdata_repository::{
    DataCache, FileCache, FileSystemRepository, MemoryCache, MemoryRepository, Repository,
    RepositoryConfig, RepositorySource,
};
use std::sync::Arc;

use crate::cache_gateway::CacheGateway;
use crate::config::{CacheBackend, CacheConfig, EngineConfig};
use crate::engine::FlatDataEngine;
use crate::error::Result;

/// Builder for FlatDataEngine
///
/// # Example
///
/// ```rust,ignore
/// use flatdata_sdk::{FlatDataEngineBuilder, RepositoryConfig};
///
/// // YAML repositories from a directory, cached in memory
/// let engine = FlatDataEngineBuilder::new()
///     .with_repository_config(RepositoryConfig::file_system("data"))
///     .with_cache(Arc::new(MemoryCache::new()))
///     .build()
///     .await?;
///
/// // Pre-built repository source (for testing)
/// let engine = FlatDataEngineBuilder::new()
///     .with_repository(Arc::new(MemoryRepository::new()))
///     .hydrate_foreign_relations(false)
///     .build()
///     .await?;
/// ```
pub struct FlatDataEngineBuilder {
    config: EngineConfig,
    repository: Option<Arc<dyn Repository>>,
    cache: Option<Arc<dyn DataCache>>,
}

impl FlatDataEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            repository: None,
            cache: None,
        }
    }

    /// Replace the whole configuration
    ///
    /// Repository and cache instances set with `with_repository` and
    /// `with_cache` still take precedence over the configured ones.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    // ========== Repository source ==========

    /// Use an existing repository source
    pub fn with_repository(mut self, repository: Arc<dyn Repository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Create the repository source from configuration at build time
    pub fn with_repository_config(mut self, config: RepositoryConfig) -> Self {
        self.config.repository = config;
        self
    }

    // ========== Cache ==========

    /// Use an existing cache
    pub fn with_cache(mut self, cache: Arc<dyn DataCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Create the cache from configuration at build time
    pub fn with_cache_config(mut self, config: CacheConfig) -> Self {
        self.config.cache = config;
        self
    }

    // ========== Hydration ==========

    pub fn hydrate_local_relations(mut self, enable: bool) -> Self {
        self.config.hydrate_local_relations = enable;
        self
    }

    pub fn hydrate_foreign_relations(mut self, enable: bool) -> Self {
        self.config.hydrate_foreign_relations = enable;
        self
    }

    pub fn stage_relations(mut self, enable: bool) -> Self {
        self.config.stage_relations = enable;
        self
    }

    /// Build the engine
    pub async fn build(self) -> Result<FlatDataEngine> {
        let repository = match self.repository {
            Some(repository) => repository,
            None => Self::repository_from_config(&self.config.repository)?,
        };

        let cache = match self.cache {
            Some(cache) => Some(cache),
            None => Self::cache_from_config(&self.config.cache)?,
        };

        tracing::info!(
            "Flat data engine ready (extension: {}, cache: {}, local: {}, foreign: {}, staging: {})",
            repository.extension(),
            cache.is_some(),
            self.config.hydrate_local_relations,
            self.config.hydrate_foreign_relations,
            self.config.stage_relations
        );

        Ok(FlatDataEngine::new(
            repository,
            CacheGateway::new(cache),
            self.config,
        ))
    }

    fn repository_from_config(config: &RepositoryConfig) -> Result<Arc<dyn Repository>> {
        match config.source {
            RepositorySource::FileSystem => Ok(Arc::new(FileSystemRepository::from_config(config)?)),
            RepositorySource::Memory => Ok(Arc::new(MemoryRepository::new())),
        }
    }

    fn cache_from_config(config: &CacheConfig) -> Result<Option<Arc<dyn DataCache>>> {
        match &config.backend {
            CacheBackend::None => Ok(None),
            CacheBackend::Memory => Ok(Some(Arc::new(MemoryCache::new()))),
            CacheBackend::File { directory } => Ok(Some(Arc::new(FileCache::new(directory)?))),
        }
    }
}

impl Default for FlatDataEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
