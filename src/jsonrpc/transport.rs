//! Transport layer for JSON-RPC communication.
//!
//! LSP-style message framing (Content-Length headers) over stdio or a Unix
//! domain socket. Framing is shared between transports through the generic
//! frame reader/writer below.

use crate::jsonrpc::protocol::{JsonRpcRequest, JsonRpcResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, trace};

/// Transport trait for different communication methods
#[async_trait]
pub trait Transport: Send + Sync {
    /// Read a JSON-RPC request from the transport.
    ///
    /// `Ok(None)` means the peer closed the transport cleanly.
    async fn read_request(&mut self) -> Result<Option<JsonRpcRequest>>;

    /// Write a JSON-RPC response to the transport
    async fn write_response(&mut self, response: JsonRpcResponse) -> Result<()>;

    /// Close the transport connection
    async fn close(&mut self) -> Result<()>;

    /// Transport description for logging
    fn description(&self) -> &'static str;
}

/// Read one Content-Length framed message.
///
/// Returns `Ok(None)` on EOF at a message boundary; EOF inside a frame is
/// an error.
async fn read_frame<R>(reader: &mut R) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length = None;

    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            if content_length.is_none() {
                return Ok(None);
            }
            return Err(anyhow!("Connection closed mid-frame"));
        }

        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(length_str) = line.strip_prefix("Content-Length: ") {
            content_length = Some(length_str.parse::<usize>()?);
        }
        // Other headers (Content-Type, etc.) are ignored
        trace!("Received header: {}", line);
    }

    let content_length =
        content_length.ok_or_else(|| anyhow!("Missing Content-Length header"))?;

    let mut buffer = vec![0u8; content_length];
    reader.read_exact(&mut buffer).await?;

    let content = String::from_utf8(buffer)?;
    debug!("Received message: {} bytes", content_length);
    Ok(Some(content))
}

/// Write one Content-Length framed message
async fn write_frame<W>(writer: &mut W, content: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let content_bytes = content.as_bytes();
    writer
        .write_all(format!("Content-Length: {}\r\n\r\n", content_bytes.len()).as_bytes())
        .await?;
    writer.write_all(content_bytes).await?;
    writer.flush().await?;

    debug!("Sent message: {} bytes", content_bytes.len());
    Ok(())
}

fn parse_request(content: &str) -> Result<JsonRpcRequest> {
    let request: JsonRpcRequest = serde_json::from_str(content)?;
    request
        .validate()
        .map_err(|e| anyhow!("Invalid request: {}", e.message))?;
    Ok(request)
}

/// Stdio transport
pub struct StdioTransport {
    reader: BufReader<tokio::io::Stdin>,
    writer: tokio::io::Stdout,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            writer: tokio::io::stdout(),
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn read_request(&mut self) -> Result<Option<JsonRpcRequest>> {
        match read_frame(&mut self.reader).await? {
            Some(content) => Ok(Some(parse_request(&content)?)),
            None => Ok(None),
        }
    }

    async fn write_response(&mut self, response: JsonRpcResponse) -> Result<()> {
        let content = serde_json::to_string(&response)?;
        write_frame(&mut self.writer, &content).await
    }

    async fn close(&mut self) -> Result<()> {
        self.writer.flush().await?;
        debug!("Stdio transport closed");
        Ok(())
    }

    fn description(&self) -> &'static str {
        "JSON-RPC over stdin/stdout (LSP-style)"
    }
}

/// Unix domain socket transport for a single accepted connection
pub struct IpcTransport {
    reader: BufReader<tokio::net::unix::OwnedReadHalf>,
    writer: tokio::net::unix::OwnedWriteHalf,
}

impl IpcTransport {
    /// Connect to an existing socket (client side)
    pub async fn connect<P: AsRef<Path>>(path: P) -> Result<Self> {
        let stream = tokio::net::UnixStream::connect(path.as_ref()).await?;
        Ok(Self::from_stream(stream))
    }

    /// Wrap an accepted connection (server side)
    pub fn from_stream(stream: tokio::net::UnixStream) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        }
    }
}

#[async_trait]
impl Transport for IpcTransport {
    async fn read_request(&mut self) -> Result<Option<JsonRpcRequest>> {
        match read_frame(&mut self.reader).await? {
            Some(content) => Ok(Some(parse_request(&content)?)),
            None => Ok(None),
        }
    }

    async fn write_response(&mut self, response: JsonRpcResponse) -> Result<()> {
        let content = serde_json::to_string(&response)?;
        write_frame(&mut self.writer, &content).await
    }

    async fn close(&mut self) -> Result<()> {
        self.writer.shutdown().await?;
        debug!("IPC transport closed");
        Ok(())
    }

    fn description(&self) -> &'static str {
        "JSON-RPC over Unix domain socket (LSP-style)"
    }
}

/// Unix socket server transport: accepts connections one at a time and
/// serves each sequentially until the client disconnects.
pub struct IpcServerTransport {
    listener: tokio::net::UnixListener,
    socket_path: String,
    current_connection: Option<IpcTransport>,
}

impl IpcServerTransport {
    /// Bind to a socket path and start listening, replacing any stale
    /// socket file left behind by a previous run.
    pub async fn bind<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let socket_path = path_ref.to_string_lossy().to_string();

        if path_ref.exists() {
            std::fs::remove_file(path_ref)
                .map_err(|e| anyhow!("Failed to remove existing socket file: {}", e))?;
        }

        let listener = tokio::net::UnixListener::bind(path_ref)
            .map_err(|e| anyhow!("Failed to bind to socket {}: {}", socket_path, e))?;

        debug!("IPC server listening on: {}", socket_path);

        Ok(Self {
            listener,
            socket_path,
            current_connection: None,
        })
    }

    async fn ensure_connection(&mut self) -> Result<&mut IpcTransport> {
        if self.current_connection.is_none() {
            debug!("Waiting for client connection on {}", self.socket_path);
            let (stream, _addr) = self
                .listener
                .accept()
                .await
                .map_err(|e| anyhow!("Failed to accept connection: {}", e))?;
            debug!("Client connected to {}", self.socket_path);
            self.current_connection = Some(IpcTransport::from_stream(stream));
        }

        Ok(self.current_connection.as_mut().expect("connection just set"))
    }
}

#[async_trait]
impl Transport for IpcServerTransport {
    async fn read_request(&mut self) -> Result<Option<JsonRpcRequest>> {
        loop {
            let transport = self.ensure_connection().await?;
            match transport.read_request().await {
                Ok(Some(request)) => return Ok(Some(request)),
                Ok(None) => {
                    debug!("Client disconnected; accepting next connection");
                    self.current_connection = None;
                }
                Err(e) => {
                    // Client went away; drop the connection and accept the next one
                    debug!("Connection error (will accept new connection): {}", e);
                    self.current_connection = None;
                }
            }
        }
    }

    async fn write_response(&mut self, response: JsonRpcResponse) -> Result<()> {
        let transport = self
            .current_connection
            .as_mut()
            .ok_or_else(|| anyhow!("No active connection"))?;
        transport.write_response(response).await
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(ref mut transport) = self.current_connection {
            transport.close().await?;
        }
        if Path::new(&self.socket_path).exists() {
            std::fs::remove_file(&self.socket_path)?;
        }
        debug!("IPC server transport closed: {}", self.socket_path);
        Ok(())
    }

    fn description(&self) -> &'static str {
        "JSON-RPC server over Unix domain socket (LSP-style)"
    }
}

/// Transport configuration
#[derive(Debug, Clone)]
pub enum TransportConfig {
    /// Standard input/output with LSP message framing
    Stdio,
    /// Unix domain socket with specified path
    UnixSocket { path: String },
}

impl TransportConfig {
    /// Create a server-side transport from configuration
    pub async fn create_transport(&self) -> Result<Box<dyn Transport>> {
        match self {
            TransportConfig::Stdio => Ok(Box::new(StdioTransport::new())),
            TransportConfig::UnixSocket { path } => {
                let transport = IpcServerTransport::bind(path).await?;
                Ok(Box::new(transport))
            }
        }
    }

    pub fn description(&self) -> String {
        match self {
            TransportConfig::Stdio => "stdin/stdout".to_string(),
            TransportConfig::UnixSocket { path } => format!("Unix socket ({})", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_round_trip() {
        tokio_test::block_on(async {
            let content = r#"{"jsonrpc":"2.0","method":"test","id":1}"#;
            let mut buffer: Vec<u8> = Vec::new();
            write_frame(&mut buffer, content).await.unwrap();

            let framed = String::from_utf8(buffer.clone()).unwrap();
            assert!(framed.starts_with(&format!("Content-Length: {}\r\n\r\n", content.len())));

            let mut reader = BufReader::new(std::io::Cursor::new(buffer));
            let read_back = read_frame(&mut reader).await.unwrap();
            assert_eq!(read_back.as_deref(), Some(content));
        });
    }

    #[test]
    fn test_read_frame_eof_at_boundary_is_clean_close() {
        tokio_test::block_on(async {
            let mut reader = BufReader::new(std::io::Cursor::new(Vec::<u8>::new()));
            assert!(read_frame(&mut reader).await.unwrap().is_none());
        });
    }

    #[tokio::test]
    async fn test_read_frame_eof_mid_frame_is_error() {
        let raw = b"Content-Length: 10\r\n".to_vec();
        let mut reader = BufReader::new(std::io::Cursor::new(raw));
        let err = read_frame(&mut reader).await.unwrap_err();
        assert!(err.to_string().contains("mid-frame"));
    }

    #[tokio::test]
    async fn test_read_frame_requires_content_length() {
        let raw = b"Content-Type: application/json\r\n\r\n{}".to_vec();
        let mut reader = BufReader::new(std::io::Cursor::new(raw));
        let err = read_frame(&mut reader).await.unwrap_err();
        assert!(err.to_string().contains("Content-Length"));
    }

    #[test]
    fn test_parse_request_rejects_bad_version() {
        let err = parse_request(r#"{"jsonrpc":"1.0","method":"x","id":1}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid request"));
    }

    #[test]
    fn test_transport_config_description() {
        assert_eq!(TransportConfig::Stdio.description(), "stdin/stdout");
        let config = TransportConfig::UnixSocket {
            path: "/tmp/kantraviz.sock".to_string(),
        };
        assert!(config.description().contains("/tmp/kantraviz.sock"));
    }

    #[tokio::test]
    async fn test_ipc_request_response() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("test.sock");

        let mut server = IpcServerTransport::bind(&socket_path).await.unwrap();
        let client_path = socket_path.clone();

        let client = tokio::spawn(async move {
            let mut client = IpcTransport::connect(&client_path).await.unwrap();
            let request = JsonRpcRequest::new(
                "kantraviz/transform_report".to_string(),
                None,
                Some(serde_json::json!(1)),
            );
            let content = serde_json::to_string(&request).unwrap();
            write_frame(&mut client.writer, &content).await.unwrap();

            let raw = read_frame(&mut client.reader).await.unwrap().expect("response frame");
            serde_json::from_str::<JsonRpcResponse>(&raw).unwrap()
        });

        let request = server.read_request().await.unwrap().expect("one request");
        assert_eq!(request.method, "kantraviz/transform_report");

        server
            .write_response(JsonRpcResponse::success(
                serde_json::json!({"ok": true}),
                request.id,
            ))
            .await
            .unwrap();

        let response = client.await.unwrap();
        assert_eq!(response.result.unwrap()["ok"], true);
    }

    #[tokio::test]
    async fn test_ipc_disconnect_reads_as_close() {
        let (local, peer) = tokio::net::UnixStream::pair().unwrap();
        let mut transport = IpcTransport::from_stream(local);
        drop(peer);

        let request = transport.read_request().await.unwrap();
        assert!(request.is_none());
    }
}
