//! # Diversa Extract
//!
//! Statement extraction for the Diversa analyzer.
//!
//! Turns a PDF portfolio statement into a [`diversa_core::Statement`] by
//! delegating document understanding to the Gemini API. The document is
//! handed to the model either as its text layer or as rendered page images;
//! the model replies with a structured JSON payload that is validated into
//! core types.
//!
//! ## Usage
//!
//! ```ignore
//! use diversa_extract::{Extractor, GeminiClient};
//!
//! let client = GeminiClient::new(std::env::var("GEMINI_API_KEY")?);
//! let extractor = Extractor::new(client);
//! let statement = extractor.extract(Path::new("statement.pdf")).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod extractor;
pub mod gemini;
pub mod pdf;

pub use error::{ExtractError, ExtractResult};
pub use extractor::{Extractor, ExtractionMode, DEFAULT_RENDER_DPI};
pub use gemini::{GeminiClient, RawHolding, RawStatement, DEFAULT_MODEL, DEFAULT_TIMEOUT};
pub use pdf::{PageImage, PdfReader};
