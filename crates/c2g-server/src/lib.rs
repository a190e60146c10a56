//! HTTP server for c2g.
//!
//! Serves read-only JSON endpoints over a Confluence site:
//!
//! - `GET /api/spaces` - global spaces
//! - `GET /api/pages?space_key=..&page_title=..` - direct children of a page
//! - `GET /api/tree?space_key=..&page_title=..&after=..` - the whole page
//!   tree under a page, optionally filtered by modification date
//!
//! Missing `space_key` falls back to the configured default space and
//! missing `page_title` to `"No page"`.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use c2g_confluence::ConfluenceClient;
//! use c2g_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let confluence = ConfluenceClient::from_config(
//!         "https://example.atlassian.net/wiki",
//!         "me@example.com",
//!         "token",
//!     );
//!     run_server(ServerConfig::default(), Arc::new(confluence))
//!         .await
//!         .unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use c2g_config::{Config, ConfigError};
use c2g_confluence::ConfluenceApi;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Space key used when a request omits `space_key`.
    pub default_space: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            default_space: "NL".to_owned(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run_server(
    config: ServerConfig,
    confluence: Arc<dyn ConfluenceApi>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        confluence,
        default_space: config.default_space,
    });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from c2g config.
///
/// # Errors
///
/// Returns `ConfigError::Validation` if the `[confluence]` section is
/// missing or invalid.
pub fn server_config_from_config(config: &Config) -> Result<ServerConfig, ConfigError> {
    let confluence = config.require_confluence()?;
    Ok(ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        default_space: confluence.default_space.clone(),
    })
}
