//! Diversa CLI
//!
//! Analyze portfolio statement PDFs from the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use diversa_agent::{render_text_report, Analyst};
use diversa_extract::{Extractor, ExtractionMode, GeminiClient, DEFAULT_MODEL};

#[derive(Parser)]
#[command(name = "diversa")]
#[command(about = "Portfolio diversification analysis from PDF statements")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a statement: extract holdings, compute HHI, add commentary
    Analyze {
        /// Path to the PDF statement
        pdf: PathBuf,

        /// Skip the model commentary call
        #[arg(long)]
        no_commentary: bool,

        /// Emit the analysis as JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Send rendered page images instead of the text layer
        #[arg(long)]
        vision: bool,

        /// Model identifier
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Model request timeout in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,
    },

    /// Extract holdings only, without computing metrics
    Extract {
        /// Path to the PDF statement
        pdf: PathBuf,

        /// Send rendered page images instead of the text layer
        #[arg(long)]
        vision: bool,

        /// Model identifier
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Model request timeout in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,
    },

    /// Analyze every PDF in a directory, continuing past failures
    Batch {
        /// Directory containing PDF statements
        dir: PathBuf,

        /// Skip the model commentary call
        #[arg(long)]
        no_commentary: bool,

        /// Model identifier
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Model request timeout in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "info"
                    .parse()
                    .expect("directive is compile-time constant"),
            ),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Analyze {
            pdf,
            no_commentary,
            json,
            output,
            vision,
            model,
            timeout,
        } => {
            let analyst = build_analyst(&model, timeout, vision, !no_commentary)?;
            analyze(&analyst, &pdf, json, output.as_deref()).await?;
        }
        Command::Extract {
            pdf,
            vision,
            model,
            timeout,
        } => {
            let extractor = build_extractor(&model, timeout, vision)?;
            extract(&extractor, &pdf).await?;
        }
        Command::Batch {
            dir,
            no_commentary,
            model,
            timeout,
        } => {
            let analyst = build_analyst(&model, timeout, false, !no_commentary)?;
            batch(&analyst, &dir).await?;
        }
    }

    Ok(())
}

fn build_extractor(model: &str, timeout: u64, vision: bool) -> Result<Extractor> {
    let api_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY not set. Export your API key first")?;

    let client = GeminiClient::new(api_key)
        .with_model(model)
        .with_timeout(Duration::from_secs(timeout));

    let mode = if vision {
        ExtractionMode::Vision
    } else {
        ExtractionMode::Text
    };

    Ok(Extractor::new(client).with_mode(mode))
}

fn build_analyst(model: &str, timeout: u64, vision: bool, commentary: bool) -> Result<Analyst> {
    Ok(Analyst::new(build_extractor(model, timeout, vision)?).with_commentary(commentary))
}

async fn analyze(
    analyst: &Analyst,
    pdf: &Path,
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    info!("Analyzing: {}", pdf.display());

    let analysis = analyst
        .analyze(pdf)
        .await
        .with_context(|| format!("analysis failed for {}", pdf.display()))?;

    let rendered = if json {
        serde_json::to_string_pretty(&analysis)?
    } else {
        render_text_report(&analysis)
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

async fn extract(extractor: &Extractor, pdf: &Path) -> Result<()> {
    info!("Extracting holdings from: {}", pdf.display());

    let statement = extractor
        .extract(pdf)
        .await
        .with_context(|| format!("extraction failed for {}", pdf.display()))?;

    println!("{}", serde_json::to_string_pretty(&statement)?);
    println!();
    println!("Holdings found: {}", statement.holding_count());
    println!(
        "Computed total: {} {}",
        statement.currency,
        statement.computed_total().round_dp(2)
    );

    Ok(())
}

async fn batch(analyst: &Analyst, dir: &Path) -> Result<()> {
    // Find all PDFs
    let mut pdfs: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "pdf"))
        .collect();
    pdfs.sort();

    if pdfs.is_empty() {
        anyhow::bail!("no PDF files found in {}", dir.display());
    }

    info!("Found {} PDFs", pdfs.len());

    let mut succeeded = 0usize;
    let mut failed = 0usize;

    println!("| File | Holdings | HHI | Level |");
    println!("|------|----------|-----|-------|");

    for pdf in &pdfs {
        let name = pdf
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match analyst.analyze(pdf).await {
            Ok(analysis) => {
                succeeded += 1;
                println!(
                    "| {} | {} | {:.4} | {} |",
                    name,
                    analysis.metrics.holding_count,
                    analysis.metrics.hhi,
                    analysis.metrics.level
                );
            }
            Err(e) => {
                failed += 1;
                warn!("Failed to process {}: {}", name, e);
                println!("| {name} | - | - | failed |");
            }
        }
    }

    println!();
    println!("Processed {} PDFs: {succeeded} succeeded, {failed} failed", pdfs.len());

    if succeeded == 0 {
        anyhow::bail!("all {} documents failed", pdfs.len());
    }

    Ok(())
}
