//! Temptrend - CSV Temperature Cleaning & Trend Analysis
//!
//! Runs load → clean → analyze on a CSV file and renders the result.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use temptrend::charts::TrendChartRenderer;
use temptrend::{Pipeline, PipelineOutput, DEFAULT_CHART_PATH, DEFAULT_INPUT_PATH};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "temptrend",
    about = "Clean a temperature CSV and report its mean and linear trend"
)]
struct Cli {
    /// CSV file with `Date` and `Temperature` columns.
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    path: PathBuf,

    /// Where to write the SVG chart.
    #[arg(long, default_value = DEFAULT_CHART_PATH)]
    chart: PathBuf,

    /// Skip chart rendering.
    #[arg(long, default_value_t = false)]
    no_chart: bool,

    /// Print the analysis result as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Stage failures are already reported on stderr; the run just ends early.
    let mut pipeline = Pipeline::new(io::stderr());
    let Ok(output) = pipeline.run(&cli.path) else {
        return Ok(());
    };

    present(&cli, &output)
}

fn present(cli: &Cli, output: &PipelineOutput) -> Result<()> {
    let analysis = &output.analysis;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
    } else {
        let [slope, intercept] = analysis.temperature_trend.coefficients();
        println!(
            "mean temperature: {:.4}; trend: slope {:.6}, intercept {:.4} ({} rows)",
            analysis.mean_temperature,
            slope,
            intercept,
            output.table.height()
        );
    }

    if !cli.no_chart {
        TrendChartRenderer::save_svg(&output.table, analysis, &cli.chart)
            .with_context(|| format!("rendering chart to {}", cli.chart.display()))?;
    }
    Ok(())
}
