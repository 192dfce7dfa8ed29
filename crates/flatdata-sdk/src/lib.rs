//! Flat data query engine
//!
//! High-level API over a directory of flat repositories: fetch a
//! repository with its relations resolved, pick a record, follow its
//! properties, or filter records with simple comparisons.
//!
//! ```no_run
//! use flatdata_sdk::{FlatDataEngine, RepositoryConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let engine = FlatDataEngine::builder()
//!     .with_repository_config(RepositoryConfig::file_system("data"))
//!     .build()
//!     .await?;
//!
//! let cheap = engine
//!     .query()
//!     .get_repository("project")
//!     .await?
//!     .filter("some_value", "<", 10)?
//!     .execute();
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cache_gateway;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod hydrator;
pub mod stager;

// Re-export main types
pub use builder::FlatDataEngineBuilder;
pub use cache_gateway::{CacheGateway, CACHE_KEY_PREFIX};
pub use config::{CacheBackend, CacheConfig, EngineConfig};
pub use cursor::QueryCursor;
pub use engine::FlatDataEngine;
pub use error::{Result, SdkError};
pub use hydrator::RelationHydrator;
pub use stager::RelationStager;

// Re-export commonly used types from dependencies
pub use flatdata_core::{FilterOperator, RecordId, RecordSet, Value};
pub use flatdata_repository::{
    DataCache, DataFormat, FileCache, FileSystemRepository, MemoryCache, MemoryRepository,
    Repository, RepositoryConfig,
};
