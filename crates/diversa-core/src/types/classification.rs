//! Diversification classification.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Diversification assessment for a portfolio.
///
/// Derived by applying [`ClassificationBands`] to a concentration score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiversificationLevel {
    /// Score below the first band.
    WellDiversified,

    /// Score in the first band.
    ModeratelyDiversified,

    /// Score in the second band.
    ModeratelyConcentrated,

    /// Score at or above the last band.
    HighlyConcentrated,
}

impl DiversificationLevel {
    /// Returns a human-readable name for the level.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::WellDiversified => "Well Diversified",
            Self::ModeratelyDiversified => "Moderately Diversified",
            Self::ModeratelyConcentrated => "Moderately Concentrated",
            Self::HighlyConcentrated => "Highly Concentrated",
        }
    }
}

impl std::fmt::Display for DiversificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Thresholds mapping a concentration score to a [`DiversificationLevel`].
///
/// These are presentation thresholds, not algorithmic invariants. Bands are
/// lower-inclusive: a score of exactly `moderate` classifies as moderately
/// diversified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationBands {
    /// Scores below this are well diversified.
    pub moderate: f64,

    /// Scores below this (and at or above `moderate`) are moderately diversified.
    pub concentrated: f64,

    /// Scores at or above this are highly concentrated.
    pub high: f64,
}

impl ClassificationBands {
    /// Creates bands, validating that thresholds are strictly increasing
    /// and inside `(0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite, out-of-range, or non-increasing
    /// thresholds.
    pub fn new(moderate: f64, concentrated: f64, high: f64) -> CoreResult<Self> {
        for (name, value) in [
            ("moderate", moderate),
            ("concentrated", concentrated),
            ("high", high),
        ] {
            if !value.is_finite() || value <= 0.0 || value >= 1.0 {
                return Err(CoreError::invalid_bands(format!(
                    "'{name}' threshold {value} must be inside (0, 1)"
                )));
            }
        }

        if !(moderate < concentrated && concentrated < high) {
            return Err(CoreError::invalid_bands(format!(
                "thresholds must be strictly increasing: {moderate} < {concentrated} < {high}"
            )));
        }

        Ok(Self {
            moderate,
            concentrated,
            high,
        })
    }

    /// Classifies a concentration score against these bands.
    #[must_use]
    pub fn classify(&self, score: f64) -> DiversificationLevel {
        if score >= self.high {
            DiversificationLevel::HighlyConcentrated
        } else if score >= self.concentrated {
            DiversificationLevel::ModeratelyConcentrated
        } else if score >= self.moderate {
            DiversificationLevel::ModeratelyDiversified
        } else {
            DiversificationLevel::WellDiversified
        }
    }
}

impl Default for ClassificationBands {
    /// The standard `0.2 / 0.5 / 0.8` presentation thresholds.
    fn default() -> Self {
        Self {
            moderate: 0.2,
            concentrated: 0.5,
            high: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let bands = ClassificationBands::default();
        assert_eq!(bands.moderate, 0.2);
        assert_eq!(bands.concentrated, 0.5);
        assert_eq!(bands.high, 0.8);
    }

    #[test]
    fn test_classify_default_bands() {
        let bands = ClassificationBands::default();

        assert_eq!(bands.classify(0.0), DiversificationLevel::WellDiversified);
        assert_eq!(bands.classify(0.19), DiversificationLevel::WellDiversified);
        assert_eq!(
            bands.classify(0.2),
            DiversificationLevel::ModeratelyDiversified
        );
        assert_eq!(
            bands.classify(0.49),
            DiversificationLevel::ModeratelyDiversified
        );
        assert_eq!(
            bands.classify(0.5),
            DiversificationLevel::ModeratelyConcentrated
        );
        assert_eq!(
            bands.classify(0.79),
            DiversificationLevel::ModeratelyConcentrated
        );
        assert_eq!(bands.classify(0.8), DiversificationLevel::HighlyConcentrated);
        assert_eq!(bands.classify(1.0), DiversificationLevel::HighlyConcentrated);
    }

    #[test]
    fn test_custom_bands_validation() {
        assert!(ClassificationBands::new(0.1, 0.3, 0.6).is_ok());

        // Not increasing
        assert!(ClassificationBands::new(0.5, 0.2, 0.8).is_err());
        assert!(ClassificationBands::new(0.2, 0.2, 0.8).is_err());

        // Out of range
        assert!(ClassificationBands::new(0.0, 0.5, 0.8).is_err());
        assert!(ClassificationBands::new(0.2, 0.5, 1.0).is_err());
        assert!(ClassificationBands::new(f64::NAN, 0.5, 0.8).is_err());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(
            format!("{}", DiversificationLevel::WellDiversified),
            "Well Diversified"
        );
        assert_eq!(
            format!("{}", DiversificationLevel::HighlyConcentrated),
            "Highly Concentrated"
        );
    }

    #[test]
    fn test_serde() {
        let bands = ClassificationBands::default();
        let json = serde_json::to_string(&bands).unwrap();
        let parsed: ClassificationBands = serde_json::from_str(&json).unwrap();
        assert_eq!(bands, parsed);
    }
}
