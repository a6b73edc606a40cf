//! `GET /health`: liveness plus the size of the loaded registry.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    /// Number of registered tools.
    pub tools: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        tools: state.dispatcher.registry().len(),
    })
}
