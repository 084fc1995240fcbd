//! A single portfolio line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One holding in a portfolio statement.
///
/// A holding is a free-text label (ticker or fund name) paired with a
/// non-negative monetary value. Holdings are produced per analysis run and
/// held only in memory; they have no identity beyond their position in the
/// statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Label as it appeared in the statement (ticker or fund name).
    label: String,

    /// Monetary value in the statement's currency.
    value: Decimal,
}

impl Holding {
    /// Creates a holding, validating the label and value.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is blank or the value is negative.
    pub fn new(label: impl Into<String>, value: Decimal) -> CoreResult<Self> {
        let label = label.into();
        let trimmed = label.trim();

        if trimmed.is_empty() {
            return Err(CoreError::invalid_holding(&label, "label must not be blank"));
        }

        if value < Decimal::ZERO {
            return Err(CoreError::invalid_holding(
                trimmed,
                "value must not be negative",
            ));
        }

        Ok(Self {
            label: trimmed.to_string(),
            value,
        })
    }

    /// Returns the holding label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the holding value.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl std::fmt::Display for Holding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_valid() {
        let holding = Holding::new("VTI", dec!(12_500.50)).unwrap();
        assert_eq!(holding.label(), "VTI");
        assert_eq!(holding.value(), dec!(12_500.50));
    }

    #[test]
    fn test_label_trimmed() {
        let holding = Holding::new("  Tesouro IPCA+ 2029  ", dec!(1000)).unwrap();
        assert_eq!(holding.label(), "Tesouro IPCA+ 2029");
    }

    #[test]
    fn test_blank_label_rejected() {
        assert!(Holding::new("", dec!(100)).is_err());
        assert!(Holding::new("   ", dec!(100)).is_err());
    }

    #[test]
    fn test_negative_value_rejected() {
        let err = Holding::new("VTI", dec!(-1)).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_zero_value_allowed() {
        // A zero-value line item is valid on its own; the zero-total check
        // happens at the statement level.
        assert!(Holding::new("EMPTY", Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display() {
        let holding = Holding::new("VTI", dec!(100)).unwrap();
        assert_eq!(format!("{holding}"), "VTI: 100");
    }

    #[test]
    fn test_serde_roundtrip() {
        let holding = Holding::new("BIXN39", dec!(2_345.67)).unwrap();
        let json = serde_json::to_string(&holding).unwrap();
        let parsed: Holding = serde_json::from_str(&json).unwrap();
        assert_eq!(holding, parsed);
    }
}
