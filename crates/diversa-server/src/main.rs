//! Diversa server entry point.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diversa_agent::Analyst;
use diversa_core::ClassificationBands;
use diversa_extract::{Extractor, GeminiClient};
use diversa_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,diversa_server=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Diversa Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/diversa.toml".to_string());

    let config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    // Credential comes from the environment, never the config file
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| "GEMINI_API_KEY must be set in the environment")?;

    let bands = match &config.bands {
        Some(overrides) => overrides.validate()?,
        None => ClassificationBands::default(),
    };

    let client = GeminiClient::new(api_key)
        .with_model(&config.model)
        .with_timeout(Duration::from_secs(config.request_timeout_secs));

    let extractor = Extractor::new(client)
        .with_mode(config.extraction_mode)
        .with_render_dpi(config.render_dpi);

    let analyst = Analyst::new(extractor)
        .with_bands(bands)
        .with_commentary(config.commentary);

    // Start server
    let server = Server::new(config, Arc::new(analyst));
    server.start().await?;

    Ok(())
}
