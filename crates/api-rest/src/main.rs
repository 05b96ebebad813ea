//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when only the HTTP API (with OpenAPI/Swagger UI) is needed. The
//! workspace's main `pharma-run` binary serves the same router.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use pharma_core::{CoreConfig, DrugCatalog};

/// Main entry point for the Pharma Tools REST API server
///
/// # Environment Variables
/// - `PHARMA_REST_ADDR`: Server address (default: "0.0.0.0:8000")
/// - `PHARMA_DATA_DIR`: BDPM raw data directory (default: "data/raw")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("pharma_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PHARMA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let cfg = CoreConfig::from_env()?;

    if !cfg.data_dir().is_dir() {
        tracing::warn!(
            "data directory {} does not exist, catalog will be empty",
            cfg.data_dir().display()
        );
    }
    let catalog = DrugCatalog::load(cfg.data_dir());

    tracing::info!("-- Starting Pharma Tools REST API on {}", addr);

    api_rest::serve(&addr, AppState::new(catalog)).await
}
