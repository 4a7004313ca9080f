//! Lexis server binary
//!
//! Starts the HTTP server for string analysis.

use clap::Parser;
use lexis_server::{
    config::{ServerConfig, StorageBackend},
    start_server, ServerError,
};
use std::process;
use tracing_subscriber::EnvFilter;

/// Lexis - analyze strings and query them over HTTP.
#[derive(Debug, Parser)]
#[command(name = "lexis-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "LEXIS_CONFIG")]
    config: Option<String>,

    /// Override the bind address
    #[arg(short, long = "bind", env = "LEXIS_BIND_ADDRESS")]
    bind: Option<String>,

    /// Override the bind port
    #[arg(short, long, env = "LEXIS_PORT")]
    port: Option<u16>,

    /// Override the SQLite database path
    #[arg(short, long, env = "LEXIS_DATABASE")]
    database: Option<String>,

    /// Keep records in memory instead of SQLite
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    if let Some(address) = cli.bind {
        config.bind_address = address;
    }
    if let Some(port) = cli.port {
        config.bind_port = port;
    }
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    if cli.memory {
        config.storage = StorageBackend::Memory;
    }

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    start_server(config).await
}
