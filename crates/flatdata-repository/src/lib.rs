//! Repository layer for flat data queries
//!
//! A *repository* is one named file (for example `project.yml`) holding a
//! mapping of record ids to records. This crate knows how to find, list and
//! parse those files, and provides the byte caches used to keep hydrated
//! repositories around.
//!
//! # Quick Start
//!
//! ```no_run
//! use flatdata_repository::{FileSystemRepository, Repository, YamlParser};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = FileSystemRepository::new("data", Box::new(YamlParser))?;
//!
//!     let projects = repo.load_raw("project").await?;
//!     println!("{} projects", projects.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │        Query Engine (flatdata-sdk)     │
//! └──────────────┬─────────────────────────┘
//!                │ Repository / DataCache traits
//!                ↓
//! ┌──────────────────────┐  ┌─────────────────────┐
//! │ FileSystemRepository │  │ MemoryCache         │
//! │ MemoryRepository     │  │ FileCache           │
//! └──────────┬───────────┘  └─────────────────────┘
//!            │ DataParser
//!            ↓
//!    YamlParser / JsonParser
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod models;
pub mod parser;
pub mod traits;

// Re-exports - Configuration
pub use config::{ConfigError, RepositoryConfig, RepositorySource};

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Parsers
pub use parser::{DataFormat, DataParser, JsonParser, YamlParser};

// Re-exports - Repositories and caches
pub use cache::{FileCache, MemoryCache};
pub use file_system::FileSystemRepository;
pub use memory::MemoryRepository;
pub use models::*;
pub use traits::*;
