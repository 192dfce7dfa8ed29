//! FlatDataEngine - entry point for relation-aware repository queries

use flatdata_core::{RecordSet, RelationDeclaration, Value};
use flatdata_repository::Repository;
use std::sync::Arc;

use crate::builder::FlatDataEngineBuilder;
use crate::cache_gateway::CacheGateway;
use crate::config::EngineConfig;
use crate::cursor::QueryCursor;
use crate::error::Result;
use crate::hydrator::{load_record_set, RelationHydrator};
use crate::stager::RelationStager;

/// Query engine over one set of repositories
///
/// # Example
///
/// ```no_run
/// use flatdata_sdk::{FlatDataEngine, RepositoryConfig};
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let engine = FlatDataEngine::builder()
///     .with_repository_config(RepositoryConfig::file_system("data"))
///     .build()
///     .await?;
///
/// let manager = engine
///     .query()
///     .get_repository("project")
///     .await?
///     .get_record("real_project_1")?
///     .get_property("manager")
///     .await?
///     .execute();
/// # Ok(())
/// # }
/// ```
pub struct FlatDataEngine {
    repository: Arc<dyn Repository>,
    cache: CacheGateway,
    config: EngineConfig,
}

impl FlatDataEngine {
    pub(crate) fn new(
        repository: Arc<dyn Repository>,
        cache: CacheGateway,
        config: EngineConfig,
    ) -> Self {
        Self {
            repository,
            cache,
            config,
        }
    }

    /// Start building an engine
    pub fn builder() -> FlatDataEngineBuilder {
        FlatDataEngineBuilder::new()
    }

    /// Build an engine entirely from configuration
    pub async fn from_config(config: EngineConfig) -> Result<Self> {
        FlatDataEngineBuilder::new().with_config(config).build().await
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Underlying repository source
    pub fn repository(&self) -> &dyn Repository {
        self.repository.as_ref()
    }

    pub fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    /// Raw repository content, without hydration or caching
    pub async fn load_repository(&self, name: &str) -> Result<Value> {
        Ok(self.repository.load_raw(name).await?)
    }

    /// Names of all available repositories
    pub async fn repository_names(&self) -> Result<Vec<String>> {
        Ok(self.repository.list_repository_names().await?)
    }

    /// Fully hydrated record set of a repository
    ///
    /// Served from the cache when possible. Otherwise local relations are
    /// resolved, then foreign relations, then one-to-one relations are
    /// staged, and the result is written back to the cache.
    pub async fn hydrated_repository(&self, name: &str) -> Result<RecordSet> {
        if let Some(records) = self.cache.fetch(name).await {
            return Ok(records);
        }

        let mut records = load_record_set(self.repository(), name).await?;
        let hydrator = RelationHydrator::new(self.repository());

        if self.config.hydrate_local_relations {
            records = hydrator.hydrate_local(records).await?;
        }
        if self.config.hydrate_foreign_relations {
            records = hydrator.hydrate_foreign(name, records).await?;
        }
        if self.config.stage_relations {
            records = RelationStager::new().stage(records);
        }

        tracing::debug!("Hydrated repository '{}' ({} records)", name, records.len());

        self.cache.store(name, &records).await;
        Ok(records)
    }

    /// Records of the target repository a declaration points at
    pub async fn resolve_declaration(&self, declaration: &RelationDeclaration) -> Result<RecordSet> {
        let target = load_record_set(self.repository(), &declaration.repository).await?;
        Ok(declaration.resolve(&target))
    }

    /// Start a new query chain
    pub fn query(&self) -> QueryCursor<'_> {
        QueryCursor::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flatdata_repository::{MemoryCache, MemoryRepository, RepositoryResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn yaml(src: &str) -> Value {
        Value::from_yaml(serde_yaml::from_str(src).unwrap()).unwrap()
    }

    /// Counts raw loads made through it
    struct CountingRepository {
        inner: MemoryRepository,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl Repository for CountingRepository {
        async fn load_raw(&self, name: &str) -> RepositoryResult<Value> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load_raw(name).await
        }

        async fn list_repository_names(&self) -> RepositoryResult<Vec<String>> {
            self.inner.list_repository_names().await
        }

        async fn exists(&self, name: &str) -> RepositoryResult<bool> {
            self.inner.exists(name).await
        }

        fn extension(&self) -> &str {
            self.inner.extension()
        }
    }

    fn repositories() -> MemoryRepository {
        MemoryRepository::new()
            .with_repository(
                "project",
                yaml("p1:\n  manager:\n    repository: user\n    type: one\n    values: [ann]\n"),
            )
            .with_repository("user", yaml("ann:\n  name: Ann\n"))
    }

    #[tokio::test]
    async fn test_cache_skips_hydration() {
        let repo = Arc::new(CountingRepository {
            inner: repositories(),
            loads: AtomicUsize::new(0),
        });
        let engine = FlatDataEngine::new(
            repo.clone(),
            CacheGateway::new(Some(Arc::new(MemoryCache::new()))),
            EngineConfig::default(),
        );

        let first = engine.hydrated_repository("project").await.unwrap();
        let loads_after_first = repo.loads.load(Ordering::SeqCst);
        assert!(loads_after_first > 0);

        let second = engine.hydrated_repository("project").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(repo.loads.load(Ordering::SeqCst), loads_after_first);
    }

    #[tokio::test]
    async fn test_toggles_disable_passes() {
        let mut config = EngineConfig::default();
        config.hydrate_local_relations = false;
        config.hydrate_foreign_relations = false;

        let engine = FlatDataEngine::new(
            Arc::new(repositories()),
            CacheGateway::disabled(),
            config,
        );

        let records = engine.hydrated_repository("project").await.unwrap();
        assert_eq!(Value::Object(records), engine.load_repository("project").await.unwrap());
    }

    #[tokio::test]
    async fn test_staging_toggle() {
        let mut config = EngineConfig::default();
        config.stage_relations = false;

        let engine = FlatDataEngine::new(Arc::new(repositories()), CacheGateway::disabled(), config);
        let records = engine.hydrated_repository("project").await.unwrap();

        // Unstaged: still keyed by the target id
        assert!(records["p1"].get("manager").and_then(|m| m.get("ann")).is_some());
    }

    #[tokio::test]
    async fn test_repository_names() {
        let engine = FlatDataEngine::new(
            Arc::new(repositories()),
            CacheGateway::disabled(),
            EngineConfig::default(),
        );

        assert_eq!(engine.repository_names().await.unwrap(), vec!["project", "user"]);
    }
}
