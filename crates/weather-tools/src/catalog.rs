//! Tool catalog pushed to clients when they open the event channel.

use serde::Serialize;

use crate::jsonrpc::JSONRPC_VERSION;
use crate::registry::ToolRegistry;
use crate::tool::ToolInfo;

/// Correlation id of the catalog message.
pub const CATALOG_ID: &str = "list-1";

/// Catalog message: `{jsonrpc, id, result: {tools: [...]}}`.
///
/// Only public metadata is included; contracts and handlers never leave
/// the process.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogMessage {
    pub jsonrpc: &'static str,
    pub id: &'static str,
    pub result: CatalogResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResult {
    pub tools: Vec<ToolInfo>,
}

impl CatalogMessage {
    /// Snapshot the registry's metadata in registration order.
    pub fn from_registry(registry: &ToolRegistry) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: CATALOG_ID,
            result: CatalogResult {
                tools: registry.list(),
            },
        }
    }

    /// Render as the text payload of one push event.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
