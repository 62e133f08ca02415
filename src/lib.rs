//! Kantraviz
//!
//! Transforms Konveyor Kantra static-analysis reports (YAML) into the
//! normalized JSON model consumed by the visualization dashboard, and serves
//! that transform over LSP-style JSON-RPC for editor and UI integrations.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod jsonrpc;
pub mod models;
pub mod transform;

/// Application-wide error types with context preservation
#[derive(Debug, thiserror::Error)]
pub enum KantravizError {
    #[error("Failed to parse YAML: {source}")]
    Parse {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("Input too large: {size} bytes (limit {limit})")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Report error: {message}")]
    Report { message: String, path: Option<String> },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl KantravizError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a report error with optional path
    pub fn report(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Report {
            message: message.into(),
            path,
        }
    }

    /// Get error code for JSON-RPC responses
    pub fn error_code(&self) -> i32 {
        match self {
            KantravizError::Parse { .. } => -32700,
            KantravizError::InputTooLarge { .. } => -32010,
            KantravizError::Configuration { .. } => -32014,
            KantravizError::Transport { .. } => -32001,
            KantravizError::Report { .. } => -32011,
            KantravizError::Internal(_) => -32603,
            KantravizError::Io { .. } => -32016,
            KantravizError::Serialization { .. } => -32017,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            KantravizError::Parse { source } => {
                format!("Malformed analysis report: {}", source)
            }
            KantravizError::InputTooLarge { size, limit } => {
                format!(
                    "Report is {} bytes which exceeds the {} byte limit",
                    size, limit
                )
            }
            KantravizError::Configuration { message } => {
                format!("Configuration issue: {}", message)
            }
            KantravizError::Transport { message } => {
                format!("Communication error: {}", message)
            }
            KantravizError::Report { message, path } => {
                if let Some(p) = path {
                    format!("Report error ({}): {}", p, message)
                } else {
                    format!("Report error: {}", message)
                }
            }
            KantravizError::Internal(message) => {
                format!("Internal error: {}", message)
            }
            KantravizError::Io { source } => {
                format!("File system error: {}", source)
            }
            KantravizError::Serialization { source } => {
                format!("Data format error: {}", source)
            }
        }
    }
}

/// Convenience type alias for Results
pub type KantravizResult<T> = Result<T, KantravizError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn with_report_context(self, path: &str) -> KantravizResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn with_report_context(self, path: &str) -> KantravizResult<T> {
        self.map_err(|e| {
            KantravizError::report(
                format!("Operation failed: {}", e.into()),
                Some(path.to_string()),
            )
        })
    }
}
