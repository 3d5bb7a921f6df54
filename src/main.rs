// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::config_service::ConfigService;
use crate::application::ingest_service::IngestService;
use crate::domain::plugin_config::{config_description, ConfigChecker};
use crate::infrastructure::config::{load_bridge_config, PLUGIN_VERSION};
use crate::infrastructure::file_config_store::FileConfigStore;
use crate::infrastructure::gateway_client::HttpGateway;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_config, get_config_description, health_check, ingest_report, set_config,
};

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api", get(ingest_report).post(ingest_report))
        .route("/config", get(get_config).put(set_config).post(set_config))
        .route("/config/description", get(get_config_description))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_bridge_config()?;
    tracing::info!("Starting {} plugin {} ...", config.plugin.name, PLUGIN_VERSION);

    // Create adapters (infrastructure layer)
    let gateway = Arc::new(HttpGateway::new(
        config.gateway.base_url,
        config.gateway.token,
        Duration::from_secs(config.gateway.timeout_secs),
    )?);
    let config_store = Arc::new(FileConfigStore::new(config.plugin.config_path));

    // Create services (application layer)
    let ingest_service = IngestService::new(gateway, config.plugin.name.clone());
    let config_service =
        ConfigService::load(config_store, ConfigChecker::new(config_description())).await?;

    let state = Arc::new(AppState {
        ingest_service,
        config_service,
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("{} plugin started, listening on {}", config.plugin.name, addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
