//! JSON-RPC envelopes and the `tools/call` dispatcher.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::DispatchError;
use crate::registry::ToolRegistry;

/// Protocol version every envelope carries.
pub const JSONRPC_VERSION: &str = "2.0";

/// The only supported method.
pub const TOOLS_CALL: &str = "tools/call";

/// Inbound request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: CallParams,
}

impl RpcRequest {
    /// Build a `tools/call` request.
    pub fn tools_call(id: impl Into<String>, tool: impl Into<String>, input: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: TOOLS_CALL.to_string(),
            params: CallParams {
                tool: tool.into(),
                input,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallParams {
    pub tool: String,
    #[serde(default)]
    pub input: Value,
}

/// Outbound response envelope. Exactly one of `result` / `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseBody {
    Result(CallResult),
    Error(RpcError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    pub tool: String,
    pub output: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl From<&DispatchError> for RpcError {
    fn from(err: &DispatchError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl RpcResponse {
    pub fn success(id: impl Into<String>, result: CallResult) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id.into()),
            body: ResponseBody::Result(result),
        }
    }

    pub fn failure(id: Option<String>, err: &DispatchError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            body: ResponseBody::Error(err.into()),
        }
    }

    pub fn result(&self) -> Option<&CallResult> {
        match &self.body {
            ResponseBody::Result(result) => Some(result),
            ResponseBody::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RpcError> {
        match &self.body {
            ResponseBody::Result(_) => None,
            ResponseBody::Error(err) => Some(err),
        }
    }
}

/// Result of one dispatch, before it is rendered as an envelope.
#[derive(Debug)]
pub struct Outcome {
    /// Correlation id, when the request carried a readable one.
    pub id: Option<String>,
    pub result: Result<CallResult, DispatchError>,
}

impl Outcome {
    pub fn into_response(self) -> RpcResponse {
        match self.result {
            Ok(result) => RpcResponse {
                jsonrpc: JSONRPC_VERSION.to_string(),
                id: self.id,
                body: ResponseBody::Result(result),
            },
            Err(err) => RpcResponse::failure(self.id, &err),
        }
    }
}

/// Resolves `tools/call` requests against a read-only registry.
///
/// Every failure ends up as an error envelope; nothing is retried and each
/// request invokes its handler at most once.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    pub fn from_shared(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.registry.as_ref()
    }

    /// Dispatch an untyped request body.
    pub async fn dispatch(&self, body: Value) -> Outcome {
        let id = body.get("id").and_then(Value::as_str).map(str::to_string);

        let request = match serde_json::from_value::<RpcRequest>(body) {
            Ok(request) => request,
            Err(err) => {
                debug!("Rejecting malformed request: {}", err);
                return Outcome {
                    id,
                    result: Err(DispatchError::InvalidRequest(err.to_string())),
                };
            }
        };

        self.dispatch_request(request).await
    }

    /// Dispatch an already-parsed request envelope.
    pub async fn dispatch_request(&self, request: RpcRequest) -> Outcome {
        let result = self.run(&request).await;
        Outcome {
            id: Some(request.id),
            result,
        }
    }

    /// Dispatch an untyped request body and render the response envelope.
    pub async fn handle(&self, body: Value) -> RpcResponse {
        self.dispatch(body).await.into_response()
    }

    async fn run(&self, request: &RpcRequest) -> Result<CallResult, DispatchError> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(DispatchError::InvalidRequest(format!(
                "unsupported jsonrpc version '{}'",
                request.jsonrpc
            )));
        }

        if request.method != TOOLS_CALL {
            debug!(id = %request.id, method = %request.method, "Unsupported method");
            return Err(DispatchError::UnsupportedMethod(request.method.clone()));
        }

        let name = request.params.tool.as_str();
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| DispatchError::ToolNotFound(name.to_string()))?;

        debug!(id = %request.id, tool = name, "Dispatching tool call");

        let output = tool.call(request.params.input.clone()).await?;

        debug!(id = %request.id, tool = name, "Tool call completed");

        Ok(CallResult {
            tool: name.to_string(),
            output,
        })
    }
}
