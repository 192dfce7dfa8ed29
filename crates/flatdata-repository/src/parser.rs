//! Repository file parsers
//!
//! A parser turns the text of one repository file into a [`Value`] and
//! declares the file extension it owns. Repositories only ever see the
//! parser through [`DataParser`], so formats can be swapped freely.

use flatdata_core::Value;
use serde::{Deserialize, Serialize};

use crate::RepositoryResult;

/// Parser for one repository file format
pub trait DataParser: Send + Sync {
    /// File extension (without the dot) of repositories in this format
    fn extension(&self) -> &str;

    /// Parse the full content of a repository file
    fn parse(&self, content: &str) -> RepositoryResult<Value>;
}

/// YAML repositories (`<name>.yml`)
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl DataParser for YamlParser {
    fn extension(&self) -> &str {
        "yml"
    }

    fn parse(&self, content: &str) -> RepositoryResult<Value> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        Ok(Value::from_yaml(raw)?)
    }
}

/// JSON repositories (`<name>.json`)
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl DataParser for JsonParser {
    fn extension(&self) -> &str {
        "json"
    }

    fn parse(&self, content: &str) -> RepositoryResult<Value> {
        let raw: serde_json::Value = serde_json::from_str(content)?;
        Ok(Value::from_json(raw))
    }
}

/// Supported repository file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Yaml,
    Json,
}

impl DataFormat {
    /// Parser for this format
    pub fn parser(&self) -> Box<dyn DataParser> {
        match self {
            DataFormat::Yaml => Box::new(YamlParser),
            DataFormat::Json => Box::new(JsonParser),
        }
    }
}
