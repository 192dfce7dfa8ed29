//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use flatdata_sdk::{DataCache, FlatDataEngine, FlatDataEngineBuilder, RepositoryConfig};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// `user` repository: `bob` is referenced by projects but does not exist
pub const USER_YAML: &str = r#"mr_admin:
  name: Mr Admin
  email: admin@example.com
joe:
  name: Joe
alice:
  name: Alice
"#;

/// `project` repository: ten integer-keyed records with `some_value = i * 3`
/// plus one record carrying relations to `user`
pub fn project_yaml() -> String {
    let mut yaml = String::new();
    for i in 0..10 {
        yaml.push_str(&format!("{}:\n  name: project {}\n  some_value: {}\n", i, i, i * 3));
    }
    yaml.push_str(
        r#"real_project_1:
  name: real project 1!
  some_value: "90"
  manager:
    repository: user
    foreign_alias: managed_projects
    type: one
    values: [mr_admin]
  users:
    repository: user
    foreign_alias: projects
    values: [mr_admin, joe, bob]
"#,
    );
    yaml
}

/// Directory holding `project.yml` and `user.yml`
pub async fn create_test_data() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    fs::write(temp_dir.path().join("project.yml"), project_yaml())
        .await
        .unwrap();
    fs::write(temp_dir.path().join("user.yml"), USER_YAML)
        .await
        .unwrap();

    temp_dir
}

pub fn repository_config(dir: &TempDir) -> RepositoryConfig {
    RepositoryConfig::file_system(dir.path().to_string_lossy())
}

/// Engine over the test data, without cache
pub async fn create_test_engine() -> (TempDir, FlatDataEngine) {
    let dir = create_test_data().await;
    let engine = FlatDataEngineBuilder::new()
        .with_repository_config(repository_config(&dir))
        .build()
        .await
        .unwrap();
    (dir, engine)
}

/// Engine over the test data, with the given cache
pub async fn create_cached_engine(dir: &TempDir, cache: Arc<dyn DataCache>) -> FlatDataEngine {
    FlatDataEngineBuilder::new()
        .with_repository_config(repository_config(dir))
        .with_cache(cache)
        .build()
        .await
        .unwrap()
}
