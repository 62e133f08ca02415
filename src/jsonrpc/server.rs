//! JSON-RPC server with method dispatch.
//!
//! Reads framed requests off the transport, dispatches to registered async
//! method handlers, and writes responses back. Notifications (requests
//! without an id) are processed but never answered.

use crate::jsonrpc::{
    protocol::{JsonRpcRequest, JsonRpcResponse, JsonRpcError},
    transport::{Transport, TransportConfig},
};
use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Method handler function signature
pub type MethodHandler = Arc<
    dyn Fn(Option<serde_json::Value>) -> BoxFuture<'static, Result<serde_json::Value, JsonRpcError>>
        + Send
        + Sync,
>;

/// JSON-RPC server
pub struct JsonRpcServer {
    transport: Box<dyn Transport>,
    methods: Arc<Mutex<HashMap<String, MethodHandler>>>,
    running: Arc<Mutex<bool>>,
}

impl JsonRpcServer {
    /// Create a new server with the specified transport
    pub async fn new(transport_config: TransportConfig) -> Result<Self> {
        let transport = transport_config.create_transport().await?;
        Ok(Self::with_transport(transport))
    }

    /// Create a new server over an already established transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            methods: Arc::new(Mutex::new(HashMap::new())),
            running: Arc::new(Mutex::new(false)),
        }
    }

    /// Register an async method handler with error conversion
    pub async fn register_async_method<F, Fut, E>(&self, method_name: String, handler: F) -> Result<()>
    where
        F: Fn(Option<serde_json::Value>) -> Fut + Send + Sync + 'static + Clone,
        Fut: std::future::Future<Output = Result<serde_json::Value, E>> + Send + 'static,
        E: Into<JsonRpcError> + Send + 'static,
    {
        let wrapped_handler: MethodHandler = Arc::new(move |params| {
            let handler_clone = handler.clone();
            Box::pin(async move { handler_clone(params).await.map_err(Into::into) })
        });

        let mut methods = self.methods.lock().await;
        methods.insert(method_name.clone(), wrapped_handler);

        debug!("Registered method: {}", method_name);
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        *self.running.lock().await
    }

    /// Start the server and process requests until stopped
    pub async fn start(&mut self) -> Result<()> {
        {
            let mut running = self.running.lock().await;
            if *running {
                return Err(anyhow!("Server is already running"));
            }
            *running = true;
        }

        info!(
            "Starting JSON-RPC server with {} transport",
            self.transport.description()
        );

        while self.is_running().await {
            if let Err(e) = self.handle_single_request().await {
                // Keep serving other requests
                error!("Error handling request: {}", e);
            }
        }

        info!("JSON-RPC server stopped");
        Ok(())
    }

    /// Stop the server
    pub async fn stop(&mut self) -> Result<()> {
        {
            let mut running = self.running.lock().await;
            *running = false;
        }

        self.transport.close().await?;
        info!("JSON-RPC server stopped");
        Ok(())
    }

    async fn handle_single_request(&mut self) -> Result<()> {
        let request = match self.transport.read_request().await {
            Ok(Some(req)) => req,
            Ok(None) => {
                // Peer closed the transport; stop instead of spinning on EOF
                info!("Transport closed by peer, stopping server");
                let mut running = self.running.lock().await;
                *running = false;
                return Ok(());
            }
            Err(e) => {
                error!("Failed to read request: {}", e);
                let response = JsonRpcResponse::parse_error();
                if let Err(write_err) = self.transport.write_response(response).await {
                    error!("Failed to send error response: {}", write_err);
                }
                return Ok(());
            }
        };

        debug!("Received request: method={}, id={:?}", request.method, request.id);

        if let Some(response) = self.process_request(request).await {
            if let Err(e) = self.transport.write_response(response).await {
                error!("Failed to send response: {}", e);
            }
        }

        Ok(())
    }

    /// Process a request and return a response unless it was a notification
    async fn process_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let request_id = request.id.clone();
        let is_notification = request.is_notification();

        if let Err(error) = request.validate() {
            if !is_notification {
                return Some(JsonRpcResponse::error(error, request_id));
            }
            warn!("Invalid notification: {}", error.message);
            return None;
        }

        let handler = {
            let methods = self.methods.lock().await;
            methods.get(&request.method).cloned()
        };

        let handler = match handler {
            Some(handler) => handler,
            None => {
                if !is_notification {
                    return Some(JsonRpcResponse::method_not_found(&request.method, request_id));
                }
                warn!("Method not found for notification: {}", request.method);
                return None;
            }
        };

        match handler(request.params).await {
            Ok(result) => {
                if !is_notification {
                    Some(JsonRpcResponse::success(result, request_id))
                } else {
                    None
                }
            }
            Err(error) => {
                if !is_notification {
                    Some(JsonRpcResponse::error(error, request_id))
                } else {
                    error!(
                        "Error in notification handler for {}: {}",
                        request.method, error.message
                    );
                    None
                }
            }
        }
    }

    /// Names of the registered methods
    pub async fn registered_methods(&self) -> Vec<String> {
        let methods = self.methods.lock().await;
        methods.keys().cloned().collect()
    }

    pub fn transport_description(&self) -> &'static str {
        self.transport.description()
    }
}
