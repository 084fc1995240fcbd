//! Plain-text report rendering.
//!
//! Produces the downloadable report offered by the web front-end and
//! printed by the CLI.

use crate::analyst::Analysis;

/// Renders an analysis as a plain-text report.
#[must_use]
pub fn render_text_report(analysis: &Analysis) -> String {
    let statement = &analysis.statement;
    let metrics = &analysis.metrics;

    let mut report = String::new();

    report.push_str("PORTFOLIO DIVERSIFICATION ANALYSIS REPORT\n");
    report.push_str("==========================================\n\n");
    report.push_str(&format!(
        "Generated: {}\n",
        analysis.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(source) = &statement.source {
        report.push_str(&format!("Source: {source}\n"));
    }
    report.push('\n');

    report.push_str("PORTFOLIO SUMMARY\n");
    report.push_str("-----------------\n");
    report.push_str(&format!(
        "Total Value: {} {}\n",
        statement.currency,
        metrics.total_value.round_dp(2)
    ));
    report.push_str(&format!("Number of Holdings: {}\n\n", metrics.holding_count));

    report.push_str("HOLDINGS\n");
    report.push_str("--------\n");
    for weight in &metrics.weights {
        report.push_str(&format!(
            "{:<40} {:>14}  {:>6.1}%\n",
            weight.label,
            weight.value.round_dp(2),
            weight.weight * 100.0
        ));
    }
    report.push('\n');

    report.push_str("DIVERSIFICATION METRICS\n");
    report.push_str("-----------------------\n");
    report.push_str(&format!("HHI Index: {:.4}\n", metrics.hhi));
    match metrics.normalized_hhi {
        Some(normalized) => {
            report.push_str(&format!("Normalized HHI: {normalized:.4}\n"));
        }
        None => {
            report.push_str("Normalized HHI: undefined (single holding)\n");
        }
    }
    report.push_str(&format!("Diversification Level: {}\n\n", metrics.level));

    report.push_str("ANALYSIS & RECOMMENDATIONS\n");
    report.push_str("--------------------------\n");
    report.push_str(&analysis.commentary);
    report.push_str("\n\n");

    report.push_str("==========================================\n");
    report.push_str(
        "Note: This analysis is for informational purposes only and should not be\n\
         considered financial advice. Please consult a qualified financial advisor\n\
         for personalized investment guidance.\n",
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diversa_core::{calculate_concentration, ClassificationBands, Holding, Statement};
    use rust_decimal_macros::dec;

    fn sample_analysis() -> Analysis {
        let statement = Statement::new(vec![
            Holding::new("Tesouro IPCA+ 2029", dec!(1000)).unwrap(),
            Holding::new("BIXN39", dec!(2500)).unwrap(),
        ])
        .with_currency("BRL")
        .with_source("posicao-2025-10-06.pdf");

        let metrics =
            calculate_concentration(&statement.holdings, &ClassificationBands::default()).unwrap();

        Analysis {
            statement,
            metrics,
            commentary: "Consider trimming the largest position.".into(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_sections() {
        let report = render_text_report(&sample_analysis());

        assert!(report.contains("PORTFOLIO DIVERSIFICATION ANALYSIS REPORT"));
        assert!(report.contains("Source: posicao-2025-10-06.pdf"));
        assert!(report.contains("Total Value: BRL 3500"));
        assert!(report.contains("Number of Holdings: 2"));
        assert!(report.contains("Tesouro IPCA+ 2029"));
        assert!(report.contains("HHI Index: 0.5918"));
        assert!(report.contains("Normalized HHI: 0.1837"));
        assert!(report.contains("Diversification Level: Well Diversified"));
        assert!(report.contains("Consider trimming the largest position."));
        assert!(report.contains("informational purposes only"));
    }

    #[test]
    fn test_report_single_holding_undefined_normalized() {
        let statement = Statement::new(vec![Holding::new("VTI", dec!(100)).unwrap()]);
        let metrics =
            calculate_concentration(&statement.holdings, &ClassificationBands::default()).unwrap();
        let analysis = Analysis {
            statement,
            metrics,
            commentary: String::new(),
            generated_at: Utc::now(),
        };

        let report = render_text_report(&analysis);
        assert!(report.contains("Normalized HHI: undefined (single holding)"));
        assert!(report.contains("Diversification Level: Highly Concentrated"));
    }
}
