//! Tool trait definition and its type-erased form.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::contract::Contract;
use crate::error::{DispatchError, ToolError};

/// Trait for tools that can be invoked through the dispatcher.
///
/// Each tool declares its own input and output contracts. The handler
/// receives an input that already passed validation (defaults applied) and
/// returns a raw output value, which is checked against `Output` before it
/// reaches the caller.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Contract the raw input must satisfy.
    type Input: Contract;
    /// Contract the handler's raw output must satisfy.
    type Output: Contract;

    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Short human-readable title.
    fn title(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// Run the tool with validated input.
    async fn execute(&self, input: Self::Input) -> Result<Value, ToolError>;
}

/// Public metadata of a tool, as published in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub title: String,
    pub description: String,
}

/// Object-safe view over any [`Tool`], so tools with different contracts can
/// share one registry.
#[async_trait]
pub trait DynTool: Send + Sync {
    fn info(&self) -> ToolInfo;

    /// Validate `raw` input, run the handler once and validate its output.
    async fn call(&self, raw: Value) -> Result<Value, DispatchError>;
}

#[async_trait]
impl<T: Tool> DynTool for T {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: self.name().to_string(),
            title: self.title().to_string(),
            description: self.description().to_string(),
        }
    }

    async fn call(&self, raw: Value) -> Result<Value, DispatchError> {
        let input = T::Input::validate(raw).map_err(|violation| {
            debug!("Tool '{}' rejected input: {}", self.name(), violation);
            DispatchError::InvalidInput(violation)
        })?;

        // A panicking handler is reported like any other handler failure.
        let output = match AssertUnwindSafe(self.execute(input)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(ToolError::ExecutionFailed(format!(
                "handler panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
        .map_err(|err| {
            warn!("Tool '{}' failed: {}", self.name(), err);
            DispatchError::HandlerFailure(err)
        })?;

        T::Output::normalize(output).map_err(|violation| {
            warn!("Tool '{}' produced invalid output: {}", self.name(), violation);
            DispatchError::InvalidOutput(violation)
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
