//! Configuration types for FlatDataEngine

use flatdata_repository::RepositoryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SdkError};

/// Cache backend for hydrated repositories
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CacheBackend {
    /// No caching; every repository fetch re-hydrates
    #[default]
    None,
    /// Process-local memory cache
    Memory,
    /// One file per repository in an existing directory
    File { directory: PathBuf },
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
}

impl CacheConfig {
    pub fn memory() -> Self {
        Self {
            backend: CacheBackend::Memory,
        }
    }

    pub fn file(directory: impl Into<PathBuf>) -> Self {
        Self {
            backend: CacheBackend::File {
                directory: directory.into(),
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend != CacheBackend::None
    }
}

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where repositories are read from
    pub repository: RepositoryConfig,

    /// Cache for hydrated repositories
    pub cache: CacheConfig,

    /// Resolve relations declared by the fetched repository
    pub hydrate_local_relations: bool,

    /// Resolve relations other repositories declare towards the fetched one
    pub hydrate_foreign_relations: bool,

    /// Collapse `type: one` relations that resolved to a single record
    pub stage_relations: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set repository configuration
    pub fn with_repository(mut self, repository: RepositoryConfig) -> Self {
        self.repository = repository;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Load configuration from `config/flatdata.*` and `FLATDATA_*` variables
    ///
    /// Nested keys use `__`, e.g. `FLATDATA_REPOSITORY__BASE_PATH=data`.
    pub fn load() -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/flatdata").required(false))
            .add_source(
                config::Environment::with_prefix("FLATDATA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| SdkError::ConfigError(format!("Failed to deserialize config: {}", e))),
            Err(_) => {
                tracing::info!("No config file found, using default configuration");
                Ok(Self::default())
            }
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            cache: CacheConfig::default(),
            hydrate_local_relations: true,
            hydrate_foreign_relations: true,
            stage_relations: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatdata_repository::{DataFormat, RepositorySource};

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();

        assert!(config.hydrate_local_relations);
        assert!(config.hydrate_foreign_relations);
        assert!(config.stage_relations);
        assert!(!config.cache.is_enabled());
        assert_eq!(config.repository.source, RepositorySource::FileSystem);
    }

    #[test]
    fn test_engine_config_chaining() {
        let config = EngineConfig::new()
            .with_repository(RepositoryConfig::file_system("data"))
            .with_cache(CacheConfig::memory());

        assert_eq!(config.repository.base_path.as_deref(), Some("data"));
        assert_eq!(config.cache.backend, CacheBackend::Memory);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: EngineConfig = serde_json::from_str(
            r#"{
                "repository": {"source": "filesystem", "base_path": "data", "format": "json"},
                "cache": {"backend": {"type": "file", "directory": "/tmp/flatdata"}},
                "stage_relations": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.repository.format, DataFormat::Json);
        assert_eq!(config.cache, CacheConfig::file("/tmp/flatdata"));
        assert!(config.hydrate_local_relations);
        assert!(!config.stage_relations);
    }

    #[test]
    fn test_cache_backend_default() {
        assert_eq!(CacheBackend::default(), CacheBackend::None);
        assert!(CacheConfig::memory().is_enabled());
    }
}
