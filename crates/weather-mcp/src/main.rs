//! HTTP front end for the weather tools.
//!
//! Serves `tools/call` JSON-RPC requests and pushes the tool catalog to
//! clients that open the SSE channel.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use weather_tools::{default_registry, Dispatcher, OpenWeatherClient};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        provider = %config.openweather.base_url,
        units = config.openweather.default_units.as_str(),
        "Starting weather MCP server"
    );

    // Build the registry once; it is read-only from here on
    let client = OpenWeatherClient::new(config.openweather.clone())?;
    let registry = default_registry(Arc::new(client))?;
    let state = AppState::new(Dispatcher::new(registry));

    let app = routes::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!(addr = %config.addr, "Weather MCP server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
