//! Error types for statement extraction.

use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur while extracting a statement from a document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Document not found on disk.
    #[error("Document not found: {path}")]
    DocumentNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// The PDF could not be loaded or rendered.
    #[error("PDF error for {path}: {reason}")]
    Pdf {
        /// The document path.
        path: String,
        /// The underlying pdfium failure.
        reason: String,
    },

    /// The model API request failed at the transport level.
    #[error("Model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API returned a non-success status.
    #[error("Model API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        message: String,
    },

    /// The model response could not be interpreted.
    #[error("Unusable model response: {reason}")]
    InvalidResponse {
        /// The reason the response was rejected.
        reason: String,
    },

    /// Extraction produced no usable holdings.
    #[error("No holdings found in {path}; the document format may not be supported")]
    NoHoldings {
        /// The document path.
        path: String,
    },

    /// A core validation error.
    #[error(transparent)]
    Core(#[from] diversa_core::CoreError),
}

impl ExtractError {
    /// Create a PDF error.
    #[must_use]
    pub fn pdf(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Pdf {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExtractError::DocumentNotFound {
            path: "missing.pdf".into(),
        };
        assert!(err.to_string().contains("missing.pdf"));

        let err = ExtractError::Api {
            status: 429,
            message: "quota exceeded".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("quota exceeded"));

        let err = ExtractError::NoHoldings {
            path: "empty.pdf".into(),
        };
        assert!(err.to_string().contains("No holdings"));
    }
}
