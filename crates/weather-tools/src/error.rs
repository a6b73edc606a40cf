//! Error types for contracts, tools, the registry and dispatch.

use thiserror::Error;

/// A value failed its schema contract.
///
/// `path` names the offending field (dotted, e.g. `main.temp`); it is empty
/// when the failure concerns the value as a whole, such as a cross-field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe_violation(.path, .message))]
pub struct ContractViolation {
    pub path: String,
    pub message: String,
}

impl ContractViolation {
    /// Violation of a single field.
    pub fn field(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Violation of a rule spanning the whole value.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            message: message.into(),
        }
    }
}

fn describe_violation(path: &str, message: &str) -> String {
    if path.is_empty() {
        message.to_string()
    } else {
        format!("{}: {}", path, message)
    }
}

impl From<serde_json::Error> for ContractViolation {
    fn from(err: serde_json::Error) -> Self {
        // serde_json appends " at line X column Y", which means nothing for
        // values that never existed as text.
        let text = err.to_string();
        let message = match text.rfind(" at line ") {
            Some(idx) => text[..idx].to_string(),
            None => text,
        };
        Self::invariant(message)
    }
}

/// Errors raised by a tool handler while it runs.
#[derive(Debug, Error)]
pub enum ToolError {
    /// HTTP request to the provider failed (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Provider answered with a non-success status.
    #[error("Weather provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// General execution error.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Errors raised while building the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
}

/// Terminal error states of a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The body is not a well-formed request envelope.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// `method` is not `tools/call`.
    #[error("Method not found")]
    UnsupportedMethod(String),

    /// No registry entry for the requested tool.
    #[error("Tool not found")]
    ToolNotFound(String),

    /// Raw input does not satisfy the tool's input contract.
    #[error("Invalid input: {0}")]
    InvalidInput(ContractViolation),

    /// The handler failed while running.
    #[error("{0}")]
    HandlerFailure(#[from] ToolError),

    /// The handler's result does not satisfy the tool's output contract.
    #[error("Invalid output: {0}")]
    InvalidOutput(ContractViolation),
}

impl DispatchError {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const TOOL_ERROR: i32 = -32000;

    /// JSON-RPC error code reported to the caller.
    pub fn code(&self) -> i32 {
        match self {
            DispatchError::InvalidRequest(_) => Self::INVALID_REQUEST,
            DispatchError::UnsupportedMethod(_) | DispatchError::ToolNotFound(_) => {
                Self::METHOD_NOT_FOUND
            }
            DispatchError::InvalidInput(_)
            | DispatchError::HandlerFailure(_)
            | DispatchError::InvalidOutput(_) => Self::TOOL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(DispatchError::UnsupportedMethod("x".into()).code(), -32601);
        assert_eq!(DispatchError::ToolNotFound("x".into()).code(), -32601);
        assert_eq!(
            DispatchError::InvalidInput(ContractViolation::invariant("bad")).code(),
            -32000
        );
        assert_eq!(
            DispatchError::HandlerFailure(ToolError::ExecutionFailed("boom".into())).code(),
            -32000
        );
        assert_eq!(DispatchError::InvalidRequest("x".into()).code(), -32600);
    }

    #[test]
    fn test_messages_distinguish_method_and_tool() {
        assert_eq!(
            DispatchError::UnsupportedMethod("tools/list".into()).to_string(),
            "Method not found"
        );
        assert_eq!(
            DispatchError::ToolNotFound("nope".into()).to_string(),
            "Tool not found"
        );
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            ContractViolation::field("days", "must be at most 7").to_string(),
            "days: must be at most 7"
        );
        assert_eq!(
            ContractViolation::invariant("city or lat/lon is required").to_string(),
            "city or lat/lon is required"
        );
    }
}
