//! CLI command implementations.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::ServerSettings;
use crate::jsonrpc::{create_server, TransportConfig};
use crate::transform::{transform_report, TransformOptions};
use crate::KantravizError;

/// Transform a Kantra report file into the visualization JSON
pub async fn transform(
    input: PathBuf,
    output: Option<PathBuf>,
    app_name: Option<String>,
    date: Option<String>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let settings = ServerSettings::load()?;
    let size = std::fs::metadata(&input)?.len();
    let limit = settings.transform.max_input_size;
    if size > limit {
        return Err(KantravizError::InputTooLarge { size, limit }.into());
    }

    info!("Reading Konveyor analysis from: {}", input.display());
    let yaml_content = std::fs::read_to_string(&input)?;

    let options = TransformOptions {
        application_name: app_name.or(settings.transform.application_name),
        analysis_date: date,
    };
    let document = transform_report(&yaml_content, &options)?;

    println!("Analysis Summary:");
    println!("  Components: {}", document.summary.total_components);
    println!("  Total Issues: {}", document.summary.total_issues);
    println!("    - Critical: {}", document.summary.critical);
    println!("    - Warning: {}", document.summary.warning);
    println!("    - Info: {}", document.summary.info);
    println!("  Estimated LOC: {}", document.summary.lines_of_code);

    let json = serde_json::to_string_pretty(&document)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("Transformed data written to: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Start the Kantraviz JSON-RPC server
pub async fn serve(transport_type: String, socket_path: Option<String>) -> Result<()> {
    info!("Starting Kantraviz server with {} transport", transport_type);

    let settings = ServerSettings::load()?;
    settings.validate()?;

    let transport_config = match transport_type.as_str() {
        "stdio" => TransportConfig::Stdio,
        "socket" => TransportConfig::UnixSocket {
            path: socket_path
                .or(settings.server.socket_path.clone())
                .unwrap_or_else(|| "/tmp/kantraviz.sock".to_string()),
        },
        _ => anyhow::bail!("Invalid transport type: {}", transport_type),
    };

    info!(
        "Initializing Kantraviz JSON-RPC server with transport: {}",
        transport_config.description()
    );

    let mut server = create_server(Arc::new(settings), transport_config).await?;
    server.start().await?;

    info!("Kantraviz server stopped");
    Ok(())
}

/// Initialize default configuration
pub async fn init(force: bool) -> Result<()> {
    let config_path = ServerSettings::config_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let settings = ServerSettings::default();
    let toml_content = toml::to_string_pretty(&settings)?;
    std::fs::write(&config_path, toml_content)?;

    println!("Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Manage configuration (show, validate)
pub async fn config(show: bool, validate: bool) -> Result<()> {
    if show {
        let settings = ServerSettings::load()?;
        let toml_content = toml::to_string_pretty(&settings)?;
        println!("{}", toml_content);
    }

    if validate {
        match ServerSettings::load() {
            Ok(settings) => match settings.validate() {
                Ok(()) => println!("Configuration is valid"),
                Err(e) => error!("Configuration validation failed: {}", e),
            },
            Err(e) => error!("Failed to load configuration: {}", e),
        }
    }

    Ok(())
}

/// Show version information
pub async fn version() -> Result<()> {
    println!("Kantraviz {}", env!("CARGO_PKG_VERSION"));
    println!("Built with Rust {}", rustc_version::version()?);
    Ok(())
}
