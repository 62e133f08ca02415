//! JSON-RPC 2.0 protocol types.
//!
//! Implements the subset of the specification the dashboard integration
//! needs: plain requests and responses with LSP-style framing handled by the
//! transport layer. No batching and no server-initiated notifications; the
//! transform is strict request/response.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Request ID (string or number; absent for notifications)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 Error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl JsonRpcRequest {
    pub fn new(
        method: String,
        params: Option<serde_json::Value>,
        id: Option<serde_json::Value>,
    ) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method,
            params,
            id,
        }
    }

    /// A notification carries no id and expects no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Validate the request structure
    pub fn validate(&self) -> Result<(), JsonRpcError> {
        if self.jsonrpc != "2.0" {
            return Err(JsonRpcError {
                code: error_codes::INVALID_REQUEST,
                message: "Invalid JSON-RPC version".to_string(),
                data: None,
            });
        }

        if self.method.is_empty() {
            return Err(JsonRpcError {
                code: error_codes::INVALID_REQUEST,
                message: "Method name cannot be empty".to_string(),
                data: None,
            });
        }

        Ok(())
    }
}

impl JsonRpcResponse {
    pub fn success(result: serde_json::Value, id: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(error: JsonRpcError, id: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    pub fn parse_error() -> Self {
        Self::error(
            JsonRpcError {
                code: error_codes::PARSE_ERROR,
                message: "Parse error".to_string(),
                data: None,
            },
            None,
        )
    }

    pub fn method_not_found(method: &str, id: Option<serde_json::Value>) -> Self {
        Self::error(
            JsonRpcError {
                code: error_codes::METHOD_NOT_FOUND,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({ "method": method })),
            },
            id,
        )
    }

    pub fn invalid_params(message: &str, id: Option<serde_json::Value>) -> Self {
        Self::error(
            JsonRpcError {
                code: error_codes::INVALID_PARAMS,
                message: format!("Invalid params: {}", message),
                data: None,
            },
            id,
        )
    }
}

impl JsonRpcError {
    pub fn custom(code: i32, message: String, data: Option<serde_json::Value>) -> Self {
        Self { code, message, data }
    }
}

impl From<crate::KantravizError> for JsonRpcError {
    fn from(error: crate::KantravizError) -> Self {
        JsonRpcError {
            code: error.error_code(),
            message: error.user_message(),
            data: None,
        }
    }
}
