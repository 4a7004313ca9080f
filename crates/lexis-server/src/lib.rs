//! Lexis Server
//!
//! HTTP surface for string analysis: create, fetch, delete, and filter
//! analyzed strings either by structured parameters or by a free-text query.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;

use config::{ServerConfig, StorageBackend};
use handlers::{create_router, AppState};
use lexis_store::{MemoryStore, SqliteStore, StoreError};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store could not be opened
    #[error("Failed to open store: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Open the configured store and wrap it in application state
pub fn open_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let state = match config.storage {
        StorageBackend::Sqlite => {
            info!("Opening SQLite store at {}", config.database_path);
            AppState::new(SqliteStore::new(&config.database_path)?)
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; records will not survive a restart");
            AppState::new(MemoryStore::new())
        }
    };
    Ok(state)
}

/// Start the HTTP server
///
/// Opens the store, builds the router and serves until the process exits.
/// Tracing must already be initialized by the caller.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting Lexis server");
    info!("Bind address: {}", config.bind_addr());

    let state = open_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Lexis listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
