//! Extraction orchestration: PDF in, validated `Statement` out.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use diversa_core::{Holding, Statement};

use crate::error::{ExtractError, ExtractResult};
use crate::gemini::{GeminiClient, RawStatement};
use crate::pdf::PdfReader;

/// Default DPI for page rasterization.
pub const DEFAULT_RENDER_DPI: u32 = 150;

/// Tolerance for the informal reported-vs-computed total comparison.
const TOTAL_TOLERANCE: Decimal = Decimal::ONE;

/// How document content is handed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Send the PDF text layer (default).
    #[default]
    Text,

    /// Send rendered page images, for documents whose text layer is
    /// missing or misleading.
    Vision,
}

/// Extracts statements from PDF documents.
///
/// Owns the model client; one `extract` call performs one model request.
/// The pdfium binding is created per extraction, when the document is
/// actually read.
pub struct Extractor {
    client: GeminiClient,
    mode: ExtractionMode,
    render_dpi: u32,
}

impl Extractor {
    /// Creates an extractor in text mode.
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            mode: ExtractionMode::default(),
            render_dpi: DEFAULT_RENDER_DPI,
        }
    }

    /// Sets the extraction mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the rasterization DPI used in vision mode.
    #[must_use]
    pub fn with_render_dpi(mut self, dpi: u32) -> Self {
        self.render_dpi = dpi;
        self
    }

    /// Returns the model client.
    #[must_use]
    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    /// Extracts a statement from a PDF document.
    ///
    /// Text mode falls back to vision when the document has no usable text
    /// layer. Model rows that fail validation (blank label, negative value)
    /// are dropped with a warning; if nothing survives, extraction fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read, the model call
    /// fails, or no usable holdings are found.
    pub async fn extract(&self, path: &Path) -> ExtractResult<Statement> {
        let reader = PdfReader::new();

        let raw = match self.mode {
            ExtractionMode::Text => {
                let text = reader.extract_text(path)?;
                if text_is_blank(&text) {
                    warn!(path = %path.display(), "no text layer, falling back to page images");
                    self.extract_via_images(&reader, path).await?
                } else {
                    self.client.extract_from_text(&text).await?
                }
            }
            ExtractionMode::Vision => self.extract_via_images(&reader, path).await?,
        };

        self.build_statement(path, raw)
    }

    async fn extract_via_images(
        &self,
        reader: &PdfReader,
        path: &Path,
    ) -> ExtractResult<RawStatement> {
        let pages = reader.render_pages(path, self.render_dpi)?;
        info!(
            path = %path.display(),
            pages = pages.len(),
            dpi = self.render_dpi,
            "rendered pages for vision extraction"
        );
        self.client.extract_from_images(&pages).await
    }

    fn build_statement(&self, path: &Path, raw: RawStatement) -> ExtractResult<Statement> {
        let mut holdings = Vec::with_capacity(raw.holdings.len());
        for row in raw.holdings {
            match Holding::new(&row.label, row.value) {
                Ok(holding) => holdings.push(holding),
                Err(e) => warn!(label = %row.label, "dropping model row: {e}"),
            }
        }

        if holdings.is_empty() {
            return Err(ExtractError::NoHoldings {
                path: path.display().to_string(),
            });
        }

        let mut statement = Statement::new(holdings);
        if let Some(currency) = raw.currency {
            statement = statement.with_currency(currency);
        }
        if let Some(total) = raw.reported_total {
            statement = statement.with_reported_total(total);
        }
        if let Some(name) = path.file_name() {
            statement = statement.with_source(name.to_string_lossy());
        }

        if statement.reported_total_matches(TOTAL_TOLERANCE) == Some(false) {
            warn!(
                reported = %statement.reported_total.unwrap_or_default(),
                computed = %statement.computed_total(),
                "document-reported total does not match sum of holdings"
            );
        }

        info!(
            path = %path.display(),
            holdings = statement.holding_count(),
            total = %statement.computed_total(),
            "extracted statement"
        );

        Ok(statement)
    }
}

fn text_is_blank(text: &str) -> bool {
    // Page markers alone do not count as content.
    text.lines()
        .filter(|line| !line.starts_with("--- Page "))
        .all(|line| line.trim().is_empty())
}
