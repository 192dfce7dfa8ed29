//! Repository configuration types
//!
//! Describes where repositories come from (a directory or memory) and which
//! file format they are written in.

use serde::{Deserialize, Serialize};

use crate::parser::DataFormat;

/// Repository source type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySource {
    /// Load `<name>.<ext>` files from a directory
    #[default]
    FileSystem,
    /// Repositories are supplied in memory
    Memory,
}

/// Repository configuration
///
/// # Examples
///
/// ```rust
/// use flatdata_repository::{DataFormat, RepositoryConfig};
///
/// // YAML files in a directory
/// let config = RepositoryConfig::file_system("data");
///
/// // JSON files in a directory
/// let config = RepositoryConfig::file_system("data").with_format(DataFormat::Json);
///
/// // Memory repository (for testing)
/// let config = RepositoryConfig::memory();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Configuration source type
    #[serde(default)]
    pub source: RepositorySource,

    /// Directory holding the repository files (required for FileSystem source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// File format of the repositories
    #[serde(default)]
    pub format: DataFormat,
}

impl RepositoryConfig {
    /// Create a file system repository configuration
    ///
    /// # Arguments
    /// * `path` - Directory containing the repository files
    pub fn file_system(path: impl Into<String>) -> Self {
        Self {
            source: RepositorySource::FileSystem,
            base_path: Some(path.into()),
            format: DataFormat::default(),
        }
    }

    /// Create a memory repository configuration
    pub fn memory() -> Self {
        Self {
            source: RepositorySource::Memory,
            base_path: None,
            format: DataFormat::default(),
        }
    }

    /// Set the file format
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error if required fields are missing for the selected source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            RepositorySource::FileSystem => match self.base_path.as_deref() {
                None => Err(ConfigError::MissingField {
                    source: "FileSystem".to_string(),
                    field: "base_path".to_string(),
                }),
                Some(path) if path.trim().is_empty() => Err(ConfigError::EmptyField {
                    source: "FileSystem".to_string(),
                    field: "base_path".to_string(),
                }),
                Some(_) => Ok(()),
            },
            RepositorySource::Memory => Ok(()),
        }
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required field is missing for the selected source
    MissingField { source: String, field: String },
    /// A required field is present but blank
    EmptyField { source: String, field: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField { source, field } => {
                write!(f, "{} source requires {} to be set", source, field)
            }
            ConfigError::EmptyField { source, field } => {
                write!(f, "{} source requires a non-empty {}", source, field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
