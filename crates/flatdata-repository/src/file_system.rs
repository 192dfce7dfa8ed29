//! File system based repository implementation

use async_trait::async_trait;
use flatdata_core::Value;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::{RepositorySource, RepositoryConfig};
use crate::{error::RepositoryError, parser::DataParser, traits::Repository, RepositoryResult};

/// File system based repository
///
/// Every file named `<name>.<extension>` directly inside the root directory
/// is one repository. Files are read and parsed on every call.
pub struct FileSystemRepository {
    /// Directory holding the repository files
    root_path: PathBuf,
    /// Parser for the repository file format
    parser: Box<dyn DataParser>,
}

impl FileSystemRepository {
    /// Create a new file system repository
    ///
    /// # Arguments
    /// * `root_path` - The directory containing the repository files
    /// * `parser` - Parser for the file format
    ///
    /// # Example
    /// ```no_run
    /// use flatdata_repository::{FileSystemRepository, YamlParser};
    ///
    /// let repo = FileSystemRepository::new("data", Box::new(YamlParser)).unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(root_path: P, parser: Box<dyn DataParser>) -> RepositoryResult<Self> {
        let path = root_path.as_ref();

        // The directory must exist up front
        if !path.is_dir() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let abs_path = path
            .absolutize()
            .map_err(|_| RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            })?
            .to_path_buf();

        tracing::debug!(
            "File system repository at {} (extension: {})",
            abs_path.display(),
            parser.extension()
        );

        Ok(Self {
            root_path: abs_path,
            parser,
        })
    }

    /// Create a file system repository from configuration
    pub fn from_config(config: &RepositoryConfig) -> RepositoryResult<Self> {
        config
            .validate()
            .map_err(|e| RepositoryError::Config(e.to_string()))?;

        match (&config.source, &config.base_path) {
            (RepositorySource::FileSystem, Some(base_path)) => {
                Self::new(base_path, config.format.parser())
            }
            _ => Err(RepositoryError::Config(
                "file system repository requires a FileSystem source with base_path".to_string(),
            )),
        }
    }

    /// Root directory of the repository files
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Path of the file backing a repository
    pub fn repository_path(&self, name: &str) -> PathBuf {
        self.root_path
            .join(format!("{}.{}", name, self.parser.extension()))
    }
}

#[async_trait]
impl Repository for FileSystemRepository {
    async fn load_raw(&self, name: &str) -> RepositoryResult<Value> {
        let path = self.repository_path(name);

        if !path.is_file() {
            return Err(RepositoryError::NotFound {
                name: name.to_string(),
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(&path).await?;

        tracing::debug!("Loaded repository '{}' from {}", name, path.display());

        self.parser.parse(&content)
    }

    async fn list_repository_names(&self) -> RepositoryResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if !entry.file_type().await?.is_file() {
                continue;
            }

            if path.extension().and_then(|s| s.to_str()) != Some(self.parser.extension()) {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.is_empty() {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        tracing::debug!(
            "Found {} repositories in {}: {:?}",
            names.len(),
            self.root_path.display(),
            names
        );

        Ok(names)
    }

    async fn exists(&self, name: &str) -> RepositoryResult<bool> {
        Ok(self.repository_path(name).is_file())
    }

    fn extension(&self) -> &str {
        self.parser.extension()
    }
}

impl std::fmt::Debug for FileSystemRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSystemRepository")
            .field("root_path", &self.root_path)
            .field("extension", &self.parser.extension())
            .finish()
    }
}
