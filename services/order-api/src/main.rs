use anyhow::Result;
use common::config::AppConfig;
use common::telemetry::{init_telemetry, TelemetryConfig};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

mod auth;
mod error;
mod handlers;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    init_telemetry(&TelemetryConfig {
        service_name: "order-api".to_string(),
        log_level: config.log_level.clone(),
        json: true,
    });

    tracing::info!("Starting order API");
    tracing::info!(port = config.port, cache_ttl_secs = config.cache_ttl_secs, "Configuration loaded");

    let state = AppState::new(&config).await?;

    let app = routes::build_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Order API listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        e
    })?;

    Ok(())
}
