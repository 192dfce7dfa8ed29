//! Hydrated repositories served from a file cache
//!
//! Run with: `cargo run --example cached_queries`

use anyhow::Result;
use flatdata_sdk::{CacheConfig, EngineConfig, FlatDataEngine, MemoryCache, RepositoryConfig};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cached_queries=info,flatdata_sdk=debug,flatdata_repository=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data");
    let repository = RepositoryConfig::file_system(data_dir);

    // Memory cache: second fetch is a hit
    let cache = Arc::new(MemoryCache::new());
    let engine = FlatDataEngine::builder()
        .with_repository_config(repository.clone())
        .with_cache(cache.clone())
        .build()
        .await?;

    for round in 1..=2 {
        let started = Instant::now();
        let users = engine.hydrated_repository("user").await?;
        tracing::info!(
            "round {}: {} users in {:?}",
            round,
            users.len(),
            started.elapsed()
        );
    }

    let stats = cache.stats();
    tracing::info!(
        "memory cache: {} lookups, {} hits, {} bytes (hit rate {:.0}%)",
        stats.lookups(),
        stats.hits,
        stats.memory_bytes,
        stats.hit_rate() * 100.0
    );

    // File cache: entries outlive the engine
    let cache_dir = std::env::temp_dir().join("flatdata-demo-cache");
    tokio::fs::create_dir_all(&cache_dir).await?;

    let config = EngineConfig::new()
        .with_repository(repository)
        .with_cache(CacheConfig::file(&cache_dir));
    let engine = FlatDataEngine::from_config(config).await?;
    engine.hydrated_repository("project").await?;

    tracing::info!("File cache written to {}", cache_dir.display());

    Ok(())
}
