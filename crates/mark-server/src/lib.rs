//! HTTP server for MarkEngine.
//!
//! Serves markdown pages through [`mark_engine::MarkEngine`] using axum.
//! Every GET request is percent-decoded and dispatched with its own request
//! state; the engine itself is shared by all connections.
//!
//! # Quick Start
//!
//! ```ignore
//! use mark_engine::SiteConfig;
//! use mark_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8000,
//!         site: SiteConfig::new("/srv/site").with_default_title("My Site"),
//!         verbose: false,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (mark-server)
//!                        │
//!                        ├─► security headers, request tracing
//!                        │
//!                        └─► page handler ──► MarkEngine::dispatch_path
//!                                                 │
//!                                                 ├─► pages/**.md + header/footer
//!                                                 └─► 404.html or built-in 404
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use mark_engine::{MarkEngine, SiteConfig};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site served by the engine.
    pub site: SiteConfig,
    /// Log every dispatch outcome.
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            site: SiteConfig::new("."),
            verbose: false,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        pages = %config.site.absolute_pages_path().display(),
        templates = %config.site.absolute_templates_path().display(),
        "Serving site"
    );

    let state = Arc::new(AppState {
        engine: MarkEngine::new(config.site),
        verbose: config.verbose,
    });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Engine site configuration from a loaded `mark.toml`.
#[must_use]
pub fn site_config_from_config(config: &mark_config::Config) -> SiteConfig {
    let site = &config.site_resolved;
    SiteConfig::new(site.root.clone())
        .with_pages_path(site.pages_path.clone())
        .with_templates_path(site.templates_path.clone())
        .with_default_title(site.default_title.clone())
        .with_base_uri(site.base_uri.clone())
}

/// Create server configuration from a loaded `mark.toml`.
#[must_use]
pub fn server_config_from_config(config: &mark_config::Config, verbose: bool) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        site: site_config_from_config(config),
        verbose,
    }
}
