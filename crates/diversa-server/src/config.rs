//! Server configuration.

use serde::{Deserialize, Serialize};

use diversa_core::ClassificationBands;
use diversa_extract::ExtractionMode;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model identifier for extraction and commentary
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout for model calls, in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How document content is handed to the model
    #[serde(default)]
    pub extraction_mode: ExtractionMode,

    /// DPI for page rasterization in vision mode
    #[serde(default = "default_render_dpi")]
    pub render_dpi: u32,

    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Whether to request model commentary
    #[serde(default = "default_true")]
    pub commentary: bool,

    /// Classification band overrides (validated at startup)
    pub bands: Option<BandOverrides>,
}

/// Raw classification thresholds from the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandOverrides {
    /// Scores below this are well diversified.
    pub moderate: f64,
    /// Scores below this are moderately diversified.
    pub concentrated: f64,
    /// Scores at or above this are highly concentrated.
    pub high: f64,
}

impl BandOverrides {
    /// Validates the overrides into [`ClassificationBands`].
    ///
    /// # Errors
    ///
    /// Returns an error for non-increasing or out-of-range thresholds.
    pub fn validate(&self) -> Result<ClassificationBands, diversa_core::CoreError> {
        ClassificationBands::new(self.moderate, self.concentrated, self.high)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_model() -> String {
    diversa_extract::DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_render_dpi() -> u32 {
    diversa_extract::DEFAULT_RENDER_DPI
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model: default_model(),
            request_timeout_secs: default_timeout_secs(),
            extraction_mode: ExtractionMode::default(),
            render_dpi: default_render_dpi(),
            max_upload_bytes: default_max_upload_bytes(),
            commentary: true,
            bands: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
