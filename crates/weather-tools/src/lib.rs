//! Weather tools exposed through a schema-validated JSON-RPC interface.
//!
//! This crate provides a [`ToolRegistry`] of weather tools, a [`Dispatcher`]
//! that serves `tools/call` requests against it, and the [`CatalogMessage`]
//! pushed to clients when they open the event channel.
//!
//! # Architecture
//!
//! Every tool declares an input and an output [`Contract`]. The dispatcher
//! only sees tools through the type-erased [`DynTool`] interface: raw input
//! is validated (defaults applied), the handler runs once, and its raw output
//! is validated before it is returned. Every failure becomes a JSON-RPC error
//! envelope.
//!
//! # Built-in Tools
//!
//! - [`CurrentWeather`] - `get_current_weather`, current conditions.
//! - [`DailyForecast`] - `get_daily_forecast`, 3-hourly samples collapsed
//!   into daily summaries by [`aggregate_daily`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use weather_tools::{default_registry, Dispatcher, OpenWeatherClient, OpenWeatherConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = OpenWeatherClient::new(OpenWeatherConfig::new("api-key")).unwrap();
//!     let dispatcher = Dispatcher::new(default_registry(Arc::new(client)).unwrap());
//!
//!     let response = dispatcher
//!         .handle(json!({
//!             "jsonrpc": "2.0",
//!             "id": "1",
//!             "method": "tools/call",
//!             "params": {"tool": "get_daily_forecast", "input": {"city": "Tokyo"}}
//!         }))
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&response).unwrap());
//! }
//! ```

pub mod aggregate;
mod catalog;
mod config;
mod contract;
mod error;
mod jsonrpc;
mod provider;
mod registry;
pub mod schemas;
mod tool;
pub mod tools;

use std::sync::Arc;

pub use aggregate::{aggregate_daily, mode_label, DailySummary, RawSample};
pub use catalog::{CatalogMessage, CatalogResult, CATALOG_ID};
pub use config::{OpenWeatherConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use contract::Contract;
pub use error::{ContractViolation, DispatchError, RegistryError, ToolError};
pub use jsonrpc::{
    CallParams, CallResult, Dispatcher, Outcome, ResponseBody, RpcError, RpcRequest,
    RpcResponse, JSONRPC_VERSION, TOOLS_CALL,
};
pub use provider::{OpenWeatherClient, ProviderQuery, WeatherProvider};
pub use registry::ToolRegistry;
pub use schemas::Units;
pub use tool::{DynTool, Tool, ToolInfo};
pub use tools::{CurrentWeather, DailyForecast};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Create a registry with both weather tools, backed by `provider`.
pub fn default_registry(provider: Arc<dyn WeatherProvider>) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(CurrentWeather::new(provider.clone()))?;
    registry.register(DailyForecast::new(provider))?;
    Ok(registry)
}
