use serde::{Deserialize, Serialize};

use super::request::RpcId;
use crate::error::{ErrorCode, ResolverError};

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 response layer
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// Always present; `null` when the request id was unknown or null.
    pub id: Option<RpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object (protocol-level errors).
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self { code: -32700, message: "Parse error".into(), data: None }
    }

    pub fn invalid_request() -> Self {
        Self { code: -32600, message: "Invalid Request".into(), data: None }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self { code: -32602, message: detail.into(), data: None }
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self { code: -32603, message: detail.into(), data: None }
    }
}

// ---------------------------------------------------------------------------
// Operation-level errors (carried in JSON-RPC `data`)
// ---------------------------------------------------------------------------

/// Structured failure of a single schema operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    pub code: ErrorCode,
    pub message: String,
    /// Schema field the failure is attached to.
    pub operation: String,
}

/// Top-level operation error document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationErrorResponse {
    pub error: OperationError,
}

impl OperationErrorResponse {
    pub fn new(code: ErrorCode, operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: OperationError {
                code,
                message: message.into(),
                operation: operation.into(),
            },
        }
    }

    /// Wrap a resolver failure without changing its meaning.
    pub fn from_resolver(operation: impl Into<String>, err: &ResolverError) -> Self {
        Self::new(err.code(), operation, err.to_string())
    }
}

/// Convert an operation error into a JSON-RPC error.
///
/// The JSON-RPC `code` is derived from the operation error code.
/// The JSON-RPC `message` is the human-readable operation message.
/// The full operation error object is carried in `data` for structured clients.
impl From<OperationErrorResponse> for JsonRpcError {
    fn from(op: OperationErrorResponse) -> Self {
        let data = serde_json::to_value(&op).ok();
        Self {
            code: op.error.code.json_rpc_code(),
            message: op.error.message,
            data,
        }
    }
}
