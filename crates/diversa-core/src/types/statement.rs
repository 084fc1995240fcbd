//! Extracted portfolio statement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Holding;
use crate::error::{CoreError, CoreResult};

/// The holdings extracted from one portfolio document.
///
/// A statement is the output of the extraction step: the list of holdings,
/// the currency they are denominated in, and optionally a total the document
/// itself reported. The reported total is compared against the computed sum
/// only informally; there is no reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Holdings in document order.
    pub holdings: Vec<Holding>,

    /// Total value as independently stated in the document, if any.
    pub reported_total: Option<Decimal>,

    /// Currency code for all values (e.g. "USD", "BRL").
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Name of the source document, if known.
    pub source: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Statement {
    /// Creates a statement from holdings with the default currency.
    #[must_use]
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self {
            holdings,
            reported_total: None,
            currency: default_currency(),
            source: None,
        }
    }

    /// Sets the currency code.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into().to_uppercase();
        self
    }

    /// Sets the total reported by the document.
    #[must_use]
    pub fn with_reported_total(mut self, total: Decimal) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Sets the source document name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if the statement has no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Returns the sum of all holding values.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        self.holdings.iter().map(Holding::value).sum()
    }

    /// Compares the document-reported total against the computed sum.
    ///
    /// Returns `None` when the document reported no total. The comparison is
    /// informational only - a mismatch is worth a log line, not an error.
    #[must_use]
    pub fn reported_total_matches(&self, tolerance: Decimal) -> Option<bool> {
        self.reported_total
            .map(|reported| (reported - self.computed_total()).abs() <= tolerance)
    }

    /// Validates the statement for analysis.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement is empty.
    pub fn validate(&self) -> CoreResult<()> {
        if self.holdings.is_empty() {
            return Err(CoreError::EmptyStatement);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_statement() -> Statement {
        Statement::new(vec![
            Holding::new("Tesouro IPCA+ 2029", dec!(1000)).unwrap(),
            Holding::new("BIXN39", dec!(2500)).unwrap(),
        ])
        .with_currency("brl")
        .with_source("posicao-2025-10-06.pdf")
    }

    #[test]
    fn test_counts_and_total() {
        let statement = sample_statement();
        assert_eq!(statement.holding_count(), 2);
        assert!(!statement.is_empty());
        assert_eq!(statement.computed_total(), dec!(3500));
    }

    #[test]
    fn test_currency_uppercased() {
        assert_eq!(sample_statement().currency, "BRL");
    }

    #[test]
    fn test_reported_total_comparison() {
        let statement = sample_statement().with_reported_total(dec!(3500.30));

        assert_eq!(statement.reported_total_matches(dec!(1)), Some(true));
        assert_eq!(statement.reported_total_matches(dec!(0.01)), Some(false));

        // No reported total, nothing to compare
        assert_eq!(sample_statement().reported_total_matches(dec!(1)), None);
    }

    #[test]
    fn test_validate_empty() {
        let statement = Statement::new(vec![]);
        assert_eq!(statement.validate(), Err(CoreError::EmptyStatement));
        assert!(sample_statement().validate().is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let statement = sample_statement().with_reported_total(dec!(3500));
        let json = serde_json::to_string(&statement).unwrap();
        let parsed: Statement = serde_json::from_str(&json).unwrap();
        assert_eq!(statement, parsed);
    }

    #[test]
    fn test_currency_default_on_deserialize() {
        let parsed: Statement = serde_json::from_str(r#"{"holdings": []}"#).unwrap();
        assert_eq!(parsed.currency, "USD");
    }
}
