//! Custom JSON-RPC 2.0 implementation for Kantraviz
//!
//! A focused JSON-RPC 2.0 server supporting LSP-style message framing over
//! stdio and Unix sockets, dispatching to the transform handlers. No
//! external JSON-RPC dependencies.

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::{JsonRpcServer, MethodHandler};
pub use transport::{IpcTransport, StdioTransport, Transport, TransportConfig};

use std::sync::Arc;

use crate::config::ServerSettings;
use crate::handlers::{
    DashboardMetricsHandler, DashboardMetricsRequest, TransformFileHandler, TransformFileRequest,
    TransformReportHandler, TransformReportRequest,
};

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC method constants for Kantraviz procedures
pub const TRANSFORM_REPORT: &str = "kantraviz/transform_report";
pub const TRANSFORM_FILE: &str = "kantraviz/transform_file";
pub const DASHBOARD_METRICS: &str = "kantraviz/dashboard_metrics";

/// All supported Kantraviz JSON-RPC methods
pub const ALL_METHODS: &[&str] = &[TRANSFORM_REPORT, TRANSFORM_FILE, DASHBOARD_METRICS];

/// Create the Kantraviz JSON-RPC server with all methods registered
pub async fn create_server(
    settings: Arc<ServerSettings>,
    transport_config: TransportConfig,
) -> anyhow::Result<JsonRpcServer> {
    let server = JsonRpcServer::new(transport_config).await?;
    register_methods(&server, settings).await?;
    Ok(server)
}

/// Register all Kantraviz JSON-RPC methods with the server.
///
/// Methods accept raw request types directly, e.g. `transform_report` takes
/// `{"content": "...", "applicationName": "..."}`.
pub async fn register_methods(
    server: &JsonRpcServer,
    settings: Arc<ServerSettings>,
) -> anyhow::Result<()> {
    {
        let settings = settings.clone();
        server
            .register_async_method(TRANSFORM_REPORT.to_string(), move |params| {
                let settings = settings.clone();
                async move {
                    let request: TransformReportRequest = parse_params(params)?;
                    let document = TransformReportHandler::new(settings)
                        .handle(request)
                        .map_err(JsonRpcError::from)?;
                    to_result(&document)
                }
            })
            .await?;
    }

    {
        let settings = settings.clone();
        server
            .register_async_method(TRANSFORM_FILE.to_string(), move |params| {
                let settings = settings.clone();
                async move {
                    let request: TransformFileRequest = parse_params(params)?;
                    let document = TransformFileHandler::new(settings)
                        .handle(request)
                        .await
                        .map_err(JsonRpcError::from)?;
                    to_result(&document)
                }
            })
            .await?;
    }

    server
        .register_async_method(DASHBOARD_METRICS.to_string(), move |params| async move {
            let request: DashboardMetricsRequest = parse_params(params)?;
            let response = DashboardMetricsHandler::new()
                .handle(request)
                .map_err(JsonRpcError::from)?;
            to_result(&response)
        })
        .await?;

    tracing::info!("Registered {} Kantraviz JSON-RPC methods", ALL_METHODS.len());
    Ok(())
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    let params_value = params.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(params_value.clone()).map_err(|e| {
        let type_name = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Request");

        let received_fields: Vec<&str> = match &params_value {
            serde_json::Value::Object(map) => map.keys().map(|s| s.as_str()).collect(),
            _ => vec![],
        };
        let hint = if received_fields.is_empty() {
            "No parameters provided".to_string()
        } else {
            format!("Received fields: {}", received_fields.join(", "))
        };

        JsonRpcError::custom(
            protocol::error_codes::INVALID_PARAMS,
            format!("Invalid {}: {}. {}", type_name, e, hint),
            Some(serde_json::json!({
                "parse_error": e.to_string(),
                "received": params_value,
            })),
        )
    })
}

fn to_result<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| {
        JsonRpcError::custom(
            protocol::error_codes::INTERNAL_ERROR,
            format!("Failed to serialize response: {}", e),
            None,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params_reports_received_fields() {
        let err = parse_params::<TransformReportRequest>(Some(serde_json::json!({
            "contents": "typo"
        })))
        .unwrap_err();
        assert_eq!(err.code, protocol::error_codes::INVALID_PARAMS);
        assert!(err.message.contains("contents"));
    }

    #[test]
    fn test_parse_params_null() {
        let err = parse_params::<TransformReportRequest>(None).unwrap_err();
        assert!(err.message.contains("No parameters provided"));
    }
}
