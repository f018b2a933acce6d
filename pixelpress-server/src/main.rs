//! Pixelpress Server Binary

use anyhow::Result;
use clap::Parser;
use pixelpress_config::{ConfigLoader, PixelpressConfig};
use std::path::PathBuf;

use pixelpress_server::Server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of image worker threads (0 = one per CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", PixelpressConfig::generate_sample()?);
        return Ok(());
    }

    let mut config = ConfigLoader::new().load(cli.config.as_ref())?;
    apply_cli_overrides(&mut config, &cli)?;

    let server = Server::new(config).await?;
    server.start().await
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut PixelpressConfig, cli: &Cli) -> Result<()> {
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(workers) = cli.workers {
        config.processing.worker_count = workers;
    }

    config
        .validate_all()
        .map_err(|e| anyhow::anyhow!("Invalid configuration after CLI overrides: {}", e))
}
