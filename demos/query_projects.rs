//! Query the sample repositories in `demos/data`
//!
//! Run with: `cargo run --example query_projects`

use anyhow::Result;
use flatdata_sdk::{FlatDataEngine, RepositoryConfig, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "query_projects=info,flatdata_sdk=info,flatdata_repository=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

fn print(label: &str, value: Option<Value>) -> Result<()> {
    let json = serde_json::to_string_pretty(&value)?;
    println!("== {} ==\n{}\n", label, json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data");
    let engine = FlatDataEngine::builder()
        .with_repository_config(RepositoryConfig::file_system(data_dir))
        .build()
        .await?;

    let names = engine.repository_names().await?;
    tracing::info!("Loaded {} repositories: {:?}", names.len(), names);

    let projects = engine.query().get_repository("project").await?;

    let cheap = projects.clone().filter("some_value", "<", 10)?.execute();
    print("projects with some_value < 10", cheap)?;

    let loose = projects.clone().filter("some_value", "==", 90)?.execute();
    print("some_value == 90", loose)?;

    let strict = projects.clone().filter("some_value", "===", 90)?.execute();
    print("some_value === 90", strict)?;

    let manager = projects
        .get_record("real_project_1")?
        .get_property("manager")
        .await?
        .get_property("name")
        .await?
        .execute();
    print("manager of real_project_1", manager)?;

    let managed = engine
        .query()
        .get_repository("user")
        .await?
        .get_record("mr_admin")?
        .get_property("managed_projects")
        .await?
        .execute();
    print("projects managed by mr_admin", managed)?;

    Ok(())
}
