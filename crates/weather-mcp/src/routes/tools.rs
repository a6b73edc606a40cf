//! `POST /tools/call`: JSON-RPC tool invocation.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::{debug, info};
use weather_tools::{DispatchError, RpcResponse};

use crate::state::AppState;

/// HTTP status accompanying an error envelope.
fn status_for(err: &DispatchError) -> StatusCode {
    match err {
        DispatchError::ToolNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Dispatch one request. The body is always a response envelope, even when
/// the request body is not valid JSON.
pub async fn call_tool(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<RpcResponse>) {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("Rejecting unreadable request body: {}", rejection);
            let err = DispatchError::InvalidRequest(rejection.body_text());
            return (status_for(&err), Json(RpcResponse::failure(None, &err)));
        }
    };

    let outcome = state.dispatcher.dispatch(body).await;
    let status = match &outcome.result {
        Ok(result) => {
            info!(tool = %result.tool, "Tool call succeeded");
            StatusCode::OK
        }
        Err(err) => {
            info!(code = err.code(), "Tool call failed: {}", err);
            status_for(err)
        }
    };

    (status, Json(outcome.into_response()))
}
