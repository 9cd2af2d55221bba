//! prd-review - PRD review wizard service
//!
//! Serves the document upload endpoints, the mock catalogs and the per-session
//! review wizard (simulated analysis, issue review, report) over HTTP + SSE.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prd_common::config::{RootFolderInitializer, TomlConfig};
use prd_review::config::{Cli, ServiceConfig, MODULE_NAME};
use prd_review::AppState;

fn init_tracing(config: &ServiceConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("prd_review={0},prd_common={0},tower_http=info", config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let toml_config = TomlConfig::load_or_default(MODULE_NAME);
    let config = ServiceConfig::resolve(&cli, &toml_config);

    init_tracing(&config)?;

    info!("Starting {} (PRD review wizard)", MODULE_NAME);
    info!(
        "Version: {} (git {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Root folder and uploads directory
    let initializer = RootFolderInitializer::new(config.root_folder.clone());
    initializer
        .ensure_directory_exists()
        .map_err(|e| anyhow::anyhow!("Failed to initialize root folder: {}", e))?;
    info!("Root folder: {}", config.root_folder.display());
    info!("Uploads: {}", config.uploads_dir.display());
    info!(
        "Analysis tick: {} ms, event capacity: {}",
        config.tick_interval.as_millis(),
        config.event_capacity
    );

    let bind_address = config.bind_address();
    let api_base = config.api_base.clone();
    let state = AppState::new(config);
    let app = prd_review::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Listening on http://{}", bind_address);
    info!("API base: {}", if api_base.is_empty() { "/" } else { &api_base });
    info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
