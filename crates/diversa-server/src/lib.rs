//! # Diversa Server
//!
//! Web front-end for the Diversa portfolio analyzer.
//!
//! ## Features
//!
//! - Embedded single-page upload UI
//! - REST endpoint: multipart PDF in, analysis + text report out
//! - Health endpoint
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use diversa_server::{Server, ServerConfig};
//!
//! let server = Server::new(config, analyst);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;
pub mod ui;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use diversa_agent::Analyst;

pub use config::ServerConfig;

/// The Diversa server.
pub struct Server {
    config: ServerConfig,
    analyst: Arc<Analyst>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, analyst: Arc<Analyst>) -> Self {
        Self { config, analyst }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.analyst.clone(), self.config.max_upload_bytes)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!("Starting Diversa server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
