//! CMAPSS Pipeline - Main Entry Point

use anyhow::Context;
use clap::Parser;
use dataset_loader::DatasetVariant;
use pipeline::{init_logging, run, PipelineConfig};
use std::path::PathBuf;
use tracing::info;

/// Turbofan RUL feature pipeline.
///
/// Cleans the raw CMAPSS readings into the silver tier and writes engineered,
/// scaled features to the gold tier.
#[derive(Parser, Debug)]
#[command(name = "cmapss-pipeline", version, about)]
struct Cli {
    /// TOML configuration file (optional).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Dataset variant, FD001 to FD004.
    #[arg(long = "dataset")]
    dataset: Option<DatasetVariant>,

    /// Directory containing the raw CMAPSS text files.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Root directory for the silver and gold outputs.
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Also engineer the test split with the training scaler.
    #[arg(long = "with-test")]
    with_test: bool,

    /// Enable debug logging.
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;

    info!("=== CMAPSS Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let mut config = PipelineConfig::load(cli.config.as_deref())
        .context("failed to load pipeline configuration")?;
    if let Some(dataset) = cli.dataset {
        config.dataset = dataset;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(output_dir) = cli.output_dir {
        config = config.with_output_dir(output_dir);
    }
    config.include_test |= cli.with_test;

    let written =
        run(&config).with_context(|| format!("pipeline failed for {}", config.dataset))?;
    info!("Pipeline complete: {} files written", written.len());
    Ok(())
}
