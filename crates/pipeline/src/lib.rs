//! CMAPSS Turbofan Pipeline
//!
//! Runs the bronze to silver to gold flow: load raw readings, clean the
//! sensor columns, engineer features and persist each tier.

mod error;
mod settings;
mod sink;

pub use error::PipelineError;
pub use settings::{PipelineConfig, DEFAULT_GOLD_DIR, DEFAULT_SILVER_DIR};
pub use sink::{write_csv, write_json, write_table};

use data_cleaner::{Cleaner, CleaningReport};
use dataset_loader::{CmapssLoader, Split};
use feature_engine::{Engineered, FeatureEngineer, FittedScaler};
use sensor_table::Table;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Tables and artifacts produced by one run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub cleaned: Table,
    pub report: CleaningReport,
    pub featured: Table,
    pub scaler: Option<FittedScaler>,
    pub test_featured: Option<Table>,
}

/// Process the training split, and the test split if configured.
///
/// Nothing is written; see [`run`] for the persisted variant.
pub fn process(config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let loader = CmapssLoader::new(&config.data_dir);
    let cleaner = Cleaner::new(config.filter)?;
    let engineer = FeatureEngineer::new(config.features.clone())?;

    info!("Processing {} training split", config.dataset);
    let train = loader.load(config.dataset, Split::Train)?;
    let (cleaned, report) = cleaner.clean(train)?;
    for (category, columns) in report.iter().filter(|(_, c)| !c.is_empty()) {
        info!("Dropped {} {} columns: {:?}", columns.len(), category, columns);
    }

    let Engineered { table: featured, scaler } = engineer.engineer(cleaned.clone())?;

    let test_featured = if config.include_test {
        info!("Processing {} test split", config.dataset);
        let test = loader
            .load(config.dataset, Split::Test)?
            .project(&cleaned.column_names())?;
        Some(match &scaler {
            Some(scaler) => engineer.engineer_with(test, scaler)?,
            None => engineer.derive(test)?,
        })
    } else {
        None
    };

    Ok(PipelineOutput {
        cleaned,
        report,
        featured,
        scaler,
        test_featured,
    })
}

/// Run the pipeline and write every tier. Output files are only written
/// once all stages have succeeded.
pub fn run(config: &PipelineConfig) -> Result<Vec<PathBuf>, PipelineError> {
    let output = process(config)?;
    let mut written = Vec::new();

    let path = config.cleaned_path();
    let rows = write_csv(&output.cleaned, &path)?;
    info!("Saved cleaned data to {} ({} rows)", path.display(), rows);
    written.push(path);

    let path = config.featured_path();
    write_csv(&output.featured, &path)?;
    info!(
        "Saved featured data to {} ({} columns)",
        path.display(),
        output.featured.num_columns()
    );
    written.push(path);

    if let Some(scaler) = &output.scaler {
        let path = config.scaler_path();
        write_json(scaler, &path)?;
        info!("Saved fitted scaler to {}", path.display());
        written.push(path);
    }

    if let Some(test) = &output.test_featured {
        let path = config.test_featured_path();
        write_csv(test, &path)?;
        info!("Saved test features to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Initialize logging
pub fn init_logging(debug: bool) -> Result<(), PipelineError> {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
