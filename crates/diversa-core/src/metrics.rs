//! Concentration metrics.
//!
//! The Herfindahl-Hirschman Index (HHI) is the sum of squared weight
//! fractions over all holdings:
//!
//! ```text
//! weight_i = value_i / total
//! HHI      = Σ weight_i²              range [1/n, 1]
//! HHI*     = (HHI − 1/n) / (1 − 1/n)  range [0, 1], defined for n > 1
//! ```
//!
//! `HHI = 1/n` means all holdings are equal; `HHI = 1` means a single
//! holding owns everything. The normalized form controls for holding count.
//! For a single holding the normalized form is 0/0 and is reported as
//! undefined; classification then falls back to the raw HHI, which is
//! exactly 1.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{ClassificationBands, DiversificationLevel, Holding};

/// Weight of one holding within the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingWeight {
    /// The holding label.
    pub label: String,

    /// The holding value.
    pub value: Decimal,

    /// Fraction of total portfolio value, in `[0, 1]`.
    pub weight: f64,
}

/// Concentration metrics for one portfolio.
///
/// Pure derived values with no independent lifecycle - computed for one
/// analysis, displayed, discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationMetrics {
    /// Sum of all holding values.
    pub total_value: Decimal,

    /// Number of holdings.
    pub holding_count: usize,

    /// Per-holding weights in statement order.
    pub weights: Vec<HoldingWeight>,

    /// Herfindahl-Hirschman Index, in `[1/n, 1]`.
    pub hhi: f64,

    /// Normalized HHI in `[0, 1]`; `None` for a single-holding portfolio,
    /// where the rescaling is undefined.
    pub normalized_hhi: Option<f64>,

    /// Diversification assessment.
    pub level: DiversificationLevel,
}

impl ConcentrationMetrics {
    /// Returns the score the classification was derived from: the
    /// normalized HHI when defined, otherwise the raw HHI.
    #[must_use]
    pub fn classification_score(&self) -> f64 {
        self.normalized_hhi.unwrap_or(self.hhi)
    }
}

/// Calculates HHI, normalized HHI, and the diversification level for a
/// sequence of holdings.
///
/// # Errors
///
/// Returns [`CoreError::EmptyStatement`] for an empty sequence and
/// [`CoreError::ZeroTotalValue`] when the values sum to zero. Neither case
/// is ever computed through as `NaN`.
pub fn calculate_concentration(
    holdings: &[Holding],
    bands: &ClassificationBands,
) -> CoreResult<ConcentrationMetrics> {
    if holdings.is_empty() {
        return Err(CoreError::EmptyStatement);
    }

    let total: Decimal = holdings.iter().map(Holding::value).sum();
    if total == Decimal::ZERO {
        return Err(CoreError::ZeroTotalValue);
    }

    let total_f64 = decimal_to_f64(total)?;

    let mut weights = Vec::with_capacity(holdings.len());
    let mut hhi = 0.0_f64;

    for holding in holdings {
        let weight = decimal_to_f64(holding.value())? / total_f64;
        hhi += weight * weight;
        weights.push(HoldingWeight {
            label: holding.label().to_string(),
            value: holding.value(),
            weight,
        });
    }

    let n = holdings.len();
    let normalized_hhi = if n > 1 {
        let floor = 1.0 / n as f64;
        Some(((hhi - floor) / (1.0 - floor)).clamp(0.0, 1.0))
    } else {
        None
    };

    // Classification applies to the normalized score when it exists; a
    // single holding classifies from the raw HHI (exactly 1).
    let level = bands.classify(normalized_hhi.unwrap_or(hhi));

    Ok(ConcentrationMetrics {
        total_value: total,
        holding_count: n,
        weights,
        hhi,
        normalized_hhi,
        level,
    })
}

fn decimal_to_f64(value: Decimal) -> CoreResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| CoreError::calculation_failed(format!("cannot represent {value} as f64")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn holdings(values: &[Decimal]) -> Vec<Holding> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Holding::new(format!("H{i}"), *v).unwrap())
            .collect()
    }

    fn bands() -> ClassificationBands {
        ClassificationBands::default()
    }

    #[test]
    fn test_reference_portfolio() {
        // [1000, 2500]: weights {0.2857, 0.7143}, HHI ≈ 0.5918,
        // normalized ≈ 0.1837 -> moderately diversified
        let metrics =
            calculate_concentration(&holdings(&[dec!(1000), dec!(2500)]), &bands()).unwrap();

        assert_eq!(metrics.total_value, dec!(3500));
        assert_eq!(metrics.holding_count, 2);
        assert_relative_eq!(metrics.weights[0].weight, 0.2857, epsilon = 1e-4);
        assert_relative_eq!(metrics.weights[1].weight, 0.7143, epsilon = 1e-4);
        assert_relative_eq!(metrics.hhi, 0.5918, epsilon = 1e-4);
        assert_relative_eq!(metrics.normalized_hhi.unwrap(), 0.1837, epsilon = 1e-4);
        assert_eq!(metrics.level, DiversificationLevel::WellDiversified);
    }

    #[test]
    fn test_equal_weights() {
        // [100, 100, 100, 100]: HHI = 0.25, normalized = 0
        let metrics = calculate_concentration(
            &holdings(&[dec!(100), dec!(100), dec!(100), dec!(100)]),
            &bands(),
        )
        .unwrap();

        assert_relative_eq!(metrics.hhi, 0.25, epsilon = 1e-12);
        assert_relative_eq!(metrics.normalized_hhi.unwrap(), 0.0, epsilon = 1e-12);
        assert_eq!(metrics.level, DiversificationLevel::WellDiversified);
    }

    #[test]
    fn test_single_holding() {
        let metrics = calculate_concentration(&holdings(&[dec!(5000)]), &bands()).unwrap();

        assert_relative_eq!(metrics.hhi, 1.0, epsilon = 1e-12);
        assert_eq!(metrics.normalized_hhi, None);
        assert_relative_eq!(metrics.classification_score(), 1.0, epsilon = 1e-12);
        assert_eq!(metrics.level, DiversificationLevel::HighlyConcentrated);
    }

    #[test]
    fn test_full_concentration_with_zero_line() {
        // One holding owns 100% even though another line exists
        let metrics =
            calculate_concentration(&holdings(&[dec!(5000), dec!(0)]), &bands()).unwrap();

        assert_relative_eq!(metrics.hhi, 1.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.normalized_hhi.unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(metrics.level, DiversificationLevel::HighlyConcentrated);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(
            calculate_concentration(&[], &bands()),
            Err(CoreError::EmptyStatement)
        );
    }

    #[test]
    fn test_zero_total_rejected() {
        assert_eq!(
            calculate_concentration(&holdings(&[dec!(0), dec!(0)]), &bands()),
            Err(CoreError::ZeroTotalValue)
        );
    }

    #[test]
    fn test_serde_normalized_null_for_single_holding() {
        let metrics = calculate_concentration(&holdings(&[dec!(100)]), &bands()).unwrap();
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json["normalized_hhi"].is_null());
    }

    proptest! {
        #[test]
        fn prop_hhi_bounds(values in prop::collection::vec(1u32..1_000_000, 1..50)) {
            let decimals: Vec<Decimal> = values.iter().map(|v| Decimal::from(*v)).collect();
            let metrics = calculate_concentration(&holdings(&decimals), &bands()).unwrap();

            let n = values.len() as f64;
            prop_assert!(metrics.hhi >= 1.0 / n - 1e-9);
            prop_assert!(metrics.hhi <= 1.0 + 1e-9);

            if let Some(norm) = metrics.normalized_hhi {
                prop_assert!((0.0..=1.0).contains(&norm));
            }
        }

        #[test]
        fn prop_weights_sum_to_one(values in prop::collection::vec(1u32..1_000_000, 1..50)) {
            let decimals: Vec<Decimal> = values.iter().map(|v| Decimal::from(*v)).collect();
            let metrics = calculate_concentration(&holdings(&decimals), &bands()).unwrap();

            let sum: f64 = metrics.weights.iter().map(|w| w.weight).sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_equal_values_hit_floor(value in 1u32..1_000_000, n in 2usize..40) {
            let decimals = vec![Decimal::from(value); n];
            let metrics = calculate_concentration(&holdings(&decimals), &bands()).unwrap();

            prop_assert!((metrics.hhi - 1.0 / n as f64).abs() < 1e-9);
            prop_assert!(metrics.normalized_hhi.unwrap().abs() < 1e-9);
        }
    }
}
