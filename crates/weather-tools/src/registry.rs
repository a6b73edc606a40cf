//! Tool registry: ordered name-to-tool mapping.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use crate::error::RegistryError;
use crate::tool::{DynTool, Tool, ToolInfo};

/// Registry of invocable tools.
///
/// Tools are registered once at startup and read concurrently afterwards.
/// Iteration follows registration order.
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn DynTool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Register a tool. Fails if the name is already taken.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        self.register_boxed(Arc::new(tool))
    }

    /// Register a type-erased tool.
    pub fn register_boxed(&mut self, tool: Arc<dyn DynTool>) -> Result<(), RegistryError> {
        let name = tool.info().name;
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateTool(name));
        }
        info!("Registering tool: {}", name);
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn DynTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, in registration order.
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Public metadata of every tool, in registration order.
    pub fn list(&self) -> Vec<ToolInfo> {
        self.tools.values().map(|t| t.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
