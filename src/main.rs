use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use pharma_core::{CoreConfig, DrugCatalog};

/// Main entry point for the Pharma Tools application
///
/// Loads the BDPM drug catalog once and serves the REST API on port 8000 (configurable via
/// `PHARMA_REST_ADDR`).
///
/// # Environment Variables
/// - `PHARMA_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `PHARMA_DATA_DIR`: Directory holding `CIS_bdpm.txt` and `CIS_COMPO_bdpm.txt` (default: "data/raw")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server itself fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pharma=info".parse()?)
                .add_directive("pharma_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PHARMA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let cfg = CoreConfig::from_env()?;

    let catalog = DrugCatalog::load(cfg.data_dir());
    if catalog.is_empty() {
        tracing::warn!(
            "no drugs loaded from {}, search will return nothing",
            cfg.data_dir().display()
        );
    }

    tracing::info!("++ Starting Pharma Tools REST on {}", rest_addr);

    api_rest::serve(&rest_addr, AppState::new(catalog)).await
}
