//! Route handlers for the weather MCP server.

pub mod health;
pub mod sse;
pub mod tools;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Push channel
        .route("/sse", get(sse::catalog_stream))
        // JSON-RPC
        .route("/tools/call", post(tools::call_tool))
        // Health check
        .route("/health", get(health::health))
}
