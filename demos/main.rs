//! Command line query over configured repositories
//!
//! Configuration comes from `config/flatdata.*` and `FLATDATA_*` variables:
//!
//! ```text
//! FLATDATA_REPOSITORY__BASE_PATH=demos/data flatdata-query project real_project_1 manager
//! ```
//!
//! Arguments: `<repository> [record] [property...]`

use anyhow::Result;
use flatdata_sdk::{EngineConfig, FlatDataEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flatdata_query=info,flatdata_sdk=warn,flatdata_repository=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let mut args = std::env::args().skip(1);
    let config = EngineConfig::load()?;
    tracing::info!(
        "Querying repositories under {}",
        config.repository.base_path.as_deref().unwrap_or("<memory>")
    );
    let engine = FlatDataEngine::from_config(config).await?;

    let Some(repository) = args.next() else {
        for name in engine.repository_names().await? {
            println!("{}", name);
        }
        return Ok(());
    };

    let mut cursor = engine.query().get_repository(&repository).await?;
    if let Some(record) = args.next() {
        cursor = cursor.get_record(record)?;
        for property in args {
            cursor = cursor.get_property(&property).await?;
        }
    }

    let result = cursor.execute();
    if result.is_none() {
        tracing::info!("Query on '{}' matched nothing", repository);
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
