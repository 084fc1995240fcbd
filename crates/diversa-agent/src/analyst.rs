//! The analyst: extraction, metrics, commentary.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use diversa_core::{
    calculate_concentration, ClassificationBands, ConcentrationMetrics, Statement,
};
use diversa_extract::Extractor;

use crate::error::AgentResult;

/// Result of one portfolio analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// The extracted statement.
    pub statement: Statement,

    /// Concentration metrics computed from the statement.
    pub metrics: ConcentrationMetrics,

    /// Narrative commentary on the metrics.
    pub commentary: String,

    /// When the analysis was produced.
    pub generated_at: DateTime<Utc>,
}

/// Analyzes portfolio statements.
///
/// Owns an [`Extractor`] and runs the full pipeline for one document:
/// extract holdings, compute concentration metrics locally, then ask the
/// model to narrate the numbers. The model never computes the metrics; it
/// only comments on values this crate calculated.
pub struct Analyst {
    extractor: Extractor,
    bands: ClassificationBands,
    commentary: bool,
}

impl Analyst {
    /// Creates an analyst with default bands and commentary enabled.
    #[must_use]
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            bands: ClassificationBands::default(),
            commentary: true,
        }
    }

    /// Overrides the classification bands.
    #[must_use]
    pub fn with_bands(mut self, bands: ClassificationBands) -> Self {
        self.bands = bands;
        self
    }

    /// Enables or disables model commentary.
    #[must_use]
    pub fn with_commentary(mut self, enabled: bool) -> Self {
        self.commentary = enabled;
        self
    }

    /// Analyzes one PDF statement.
    ///
    /// A commentary failure degrades to a built-in narrative: the metrics
    /// are already computed and remain valid without prose.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction fails or the statement is rejected by
    /// the metric calculation.
    pub async fn analyze(&self, path: &Path) -> AgentResult<Analysis> {
        let statement = self.extractor.extract(path).await?;
        statement.validate()?;

        let metrics = calculate_concentration(&statement.holdings, &self.bands)?;
        info!(
            holdings = metrics.holding_count,
            hhi = metrics.hhi,
            level = %metrics.level,
            "computed concentration metrics"
        );

        let commentary = if self.commentary {
            match self
                .extractor
                .client()
                .generate_text(&commentary_prompt(&statement, &metrics))
                .await
            {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    warn!("commentary request failed, using fallback narrative: {e}");
                    fallback_commentary(&statement, &metrics)
                }
            }
        } else {
            fallback_commentary(&statement, &metrics)
        };

        Ok(Analysis {
            statement,
            metrics,
            commentary,
            generated_at: Utc::now(),
        })
    }
}

fn commentary_prompt(statement: &Statement, metrics: &ConcentrationMetrics) -> String {
    let mut holdings_block = String::new();
    for weight in &metrics.weights {
        holdings_block.push_str(&format!(
            "- {}: {} {} ({:.1}% of portfolio)\n",
            weight.label,
            statement.currency,
            weight.value.round_dp(2),
            weight.weight * 100.0
        ));
    }

    let normalized = metrics
        .normalized_hhi
        .map_or_else(|| "undefined (single holding)".to_string(), |v| format!("{v:.4}"));

    format!(
        "You are a financial portfolio analyst. The diversification metrics below \
         were already computed; do not recalculate or alter them. Write a short, \
         practical commentary (one or two paragraphs) on this portfolio's \
         diversification, with specific, actionable suggestions. Plain text only, \
         no markdown headers.\n\n\
         Holdings:\n{holdings_block}\n\
         Total value: {} {}\n\
         Number of holdings: {}\n\
         HHI: {:.4}\n\
         Normalized HHI: {normalized}\n\
         Classification: {}",
        statement.currency,
        metrics.total_value.round_dp(2),
        metrics.holding_count,
        metrics.hhi,
        metrics.level,
    )
}

/// Deterministic narrative used when commentary is disabled or the model
/// call fails.
fn fallback_commentary(statement: &Statement, metrics: &ConcentrationMetrics) -> String {
    let concentration_note = match metrics.normalized_hhi {
        None => "With a single holding, all value is concentrated in one position.".to_string(),
        Some(normalized) => format!(
            "Controlling for the number of holdings, the normalized index is {normalized:.4} \
             on a 0-to-1 scale, where 0 means perfectly even weights."
        ),
    };

    let largest = metrics
        .weights
        .iter()
        .max_by(|a, b| a.weight.total_cmp(&b.weight));

    let largest_note = largest.map_or(String::new(), |w| {
        format!(
            " The largest position, {}, accounts for {:.1}% of the total.",
            w.label,
            w.weight * 100.0
        )
    });

    format!(
        "This portfolio of {} holdings (total {} {}) has an HHI of {:.4}, which \
         classifies it as {}. {}{}",
        metrics.holding_count,
        statement.currency,
        metrics.total_value.round_dp(2),
        metrics.hhi,
        metrics.level.name().to_lowercase(),
        concentration_note,
        largest_note,
    )
}
