//! Application state shared across handlers.

use weather_tools::Dispatcher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Dispatcher over the read-only tool registry.
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Create new application state.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}
