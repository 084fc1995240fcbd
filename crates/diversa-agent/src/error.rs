//! Error types for analysis runs.

use thiserror::Error;

/// Result type for analyst operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors that can occur during a portfolio analysis.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Statement extraction failed.
    #[error(transparent)]
    Extract(#[from] diversa_extract::ExtractError),

    /// Metric calculation rejected the extracted statement.
    #[error(transparent)]
    Core(#[from] diversa_core::CoreError),
}

impl AgentError {
    /// Returns true when the failure originated in the upstream model API
    /// rather than in local processing.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Extract(
                diversa_extract::ExtractError::Http(_)
                    | diversa_extract::ExtractError::Api { .. }
                    | diversa_extract::ExtractError::InvalidResponse { .. }
            )
        )
    }
}
