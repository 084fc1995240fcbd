//! Error types for portfolio types and concentration math.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building holdings or computing metrics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid holding data.
    #[error("Invalid holding '{label}': {reason}")]
    InvalidHolding {
        /// The holding label (may be empty when the label itself is invalid).
        label: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// Statement contains no holdings.
    #[error("Statement has no holdings")]
    EmptyStatement,

    /// Total portfolio value is zero, so weights are undefined.
    #[error("Total portfolio value is zero; weights are undefined")]
    ZeroTotalValue,

    /// Invalid classification band configuration.
    #[error("Invalid classification bands: {reason}")]
    InvalidBands {
        /// The reason the bands are invalid.
        reason: String,
    },

    /// A numeric conversion failed during metric calculation.
    #[error("Calculation failed: {reason}")]
    CalculationFailed {
        /// The reason the calculation failed.
        reason: String,
    },
}

impl CoreError {
    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid bands error.
    #[must_use]
    pub fn invalid_bands(reason: impl Into<String>) -> Self {
        Self::InvalidBands {
            reason: reason.into(),
        }
    }

    /// Create a calculation failed error.
    #[must_use]
    pub fn calculation_failed(reason: impl Into<String>) -> Self {
        Self::CalculationFailed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_holding("PETR4", "negative value");
        assert!(err.to_string().contains("PETR4"));
        assert!(err.to_string().contains("negative value"));

        let err = CoreError::EmptyStatement;
        assert!(err.to_string().contains("no holdings"));

        let err = CoreError::ZeroTotalValue;
        assert!(err.to_string().contains("zero"));
    }

    #[test]
    fn test_error_clone_eq() {
        let err = CoreError::ZeroTotalValue;
        assert_eq!(err.clone(), err);
    }
}
