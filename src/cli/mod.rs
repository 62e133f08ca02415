//! CLI interface for Kantraviz.
//!
//! Provides the `transform` batch command plus server management commands.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

#[derive(Parser)]
#[command(name = "kantraviz")]
#[command(about = "Transforms Konveyor Kantra analysis reports into the visualization model")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Transform a Kantra output.yaml into the visualization JSON
    Transform {
        /// Path to the Kantra analysis report (output.yaml)
        input: PathBuf,

        /// Where to write the transformed JSON (stdout when omitted)
        output: Option<PathBuf>,

        /// Application name recorded in the document
        #[arg(long, short = 'a')]
        app_name: Option<String>,

        /// Analysis date (YYYY-MM-DD) recorded in the document
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// Start the Kantraviz JSON-RPC server
    Serve {
        #[arg(long, short = 't', default_value = "stdio")]
        transport: String,

        /// Unix socket path (used when transport = "socket")
        #[arg(long, short = 's')]
        socket_path: Option<String>,
    },

    /// Initialize default configuration at default location
    Init {
        #[arg(long)]
        force: bool,
    },

    /// Manage configuration
    Config {
        #[arg(long)]
        show: bool,

        #[arg(long)]
        validate: bool,
    },

    /// Show version information
    Version,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Run the CLI command
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Transform {
                input,
                output,
                app_name,
                date,
            } => transform(input, output, app_name, date).await,

            Commands::Serve {
                transport,
                socket_path,
            } => serve(transport, socket_path).await,

            Commands::Init { force } => init(force).await,
            Commands::Config { show, validate } => config(show, validate).await,
            Commands::Version => version().await,
        }
    }
}
