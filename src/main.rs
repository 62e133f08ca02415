//! Kantraviz - Kantra analysis report transformer and JSON-RPC server.

use anyhow::Result;
use kantraviz::cli::Cli;
use kantraviz::config::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse_args();
    cli.run().await
}
