//! `GET /sse`: pushes the tool catalog once, then holds the stream open.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use tokio_stream::{Stream, StreamExt};
use tracing::info;
use weather_tools::CatalogMessage;

use crate::error::ApiError;
use crate::state::AppState;

/// Open the push channel. Exactly one `message` event carrying the catalog is
/// sent; the stream then stays idle until the client disconnects.
pub async fn catalog_stream(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let message = CatalogMessage::from_registry(state.dispatcher.registry());
    let event = Event::default().event("message").data(message.to_json()?);

    info!(tools = message.result.tools.len(), "Catalog stream opened");

    let stream = tokio_stream::once(Ok(event)).chain(tokio_stream::pending());
    Ok(Sse::new(stream))
}
