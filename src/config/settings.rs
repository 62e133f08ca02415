use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input size cap: reports over 50MB are rejected before the
/// transform runs.
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 50 * 1024 * 1024;

/// Server-wide configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub server: ServerSection,
    pub transform: TransformSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub transport: String,
    pub socket_path: Option<String>,
    pub log_level: String,
}

/// Defaults applied to every transform request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformSection {
    pub application_name: Option<String>,
    pub max_input_size: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            server: ServerSection {
                transport: "stdio".to_string(),
                socket_path: Some("/tmp/kantraviz.sock".to_string()),
                log_level: "info".to_string(),
            },
            transform: TransformSection {
                application_name: None,
                max_input_size: DEFAULT_MAX_INPUT_SIZE,
            },
        }
    }
}

impl ServerSettings {
    /// Load settings from the config file (when present) with environment
    /// variable overrides applied on top.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Apply `KANTRAVIZ_*` environment overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("KANTRAVIZ_LOG_LEVEL") {
            self.server.log_level = val;
        }

        if let Ok(val) = std::env::var("KANTRAVIZ_TRANSPORT") {
            self.server.transport = val;
        }

        if let Ok(val) = std::env::var("KANTRAVIZ_SOCKET_PATH") {
            self.server.socket_path = Some(val);
        }

        if let Ok(val) = std::env::var("KANTRAVIZ_MAX_INPUT_SIZE") {
            if let Ok(parsed) = val.parse() {
                self.transform.max_input_size = parsed;
            }
        }
    }

    pub fn config_path() -> PathBuf {
        if let Ok(custom_path) = std::env::var("KANTRAVIZ_CONFIG_PATH") {
            PathBuf::from(custom_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("kantraviz")
                .join("config.toml")
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.server.transport.as_str() {
            "stdio" => {}
            "socket" => {
                let path_ok = self
                    .server
                    .socket_path
                    .as_deref()
                    .is_some_and(|p| !p.is_empty());
                if !path_ok {
                    anyhow::bail!("Socket path is required when using socket transport");
                }
            }
            other => anyhow::bail!("Unsupported transport type: {}", other),
        }

        if self.transform.max_input_size == 0 {
            anyhow::bail!("Max input size must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::default();
        assert_eq!(settings.server.transport, "stdio");
        assert_eq!(settings.transform.max_input_size, DEFAULT_MAX_INPUT_SIZE);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_socket_transport_requires_path() {
        let mut settings = ServerSettings::default();
        settings.server.transport = "socket".to_string();
        assert!(settings.validate().is_ok());

        settings.server.socket_path = None;
        assert!(settings.validate().is_err());

        settings.server.socket_path = Some(String::new());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_transport() {
        let mut settings = ServerSettings::default();
        settings.server.transport = "http".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_size_cap() {
        let mut settings = ServerSettings::default();
        settings.transform.max_input_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = ServerSettings::default();
        let toml_content = toml::to_string_pretty(&settings).unwrap();
        let parsed: ServerSettings = toml::from_str(&toml_content).unwrap();
        assert_eq!(parsed.server.transport, settings.server.transport);
        assert_eq!(
            parsed.transform.max_input_size,
            settings.transform.max_input_size
        );
    }
}
