//! Pipeline Configuration
//!
//! Layered as built-in defaults, then an optional TOML file, then
//! `CMAPSS_*` environment variables (`CMAPSS_FEATURES__RUL_CLIP=130`).
//! List fields take comma-separated values (`CMAPSS_FEATURES__WINDOWS=5,10`).

use crate::PipelineError;
use config::{Config, Environment, File};
use data_cleaner::FilterConfig;
use dataset_loader::{DatasetVariant, DEFAULT_DATA_DIR};
use feature_engine::FeatureConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default silver-tier directory for cleaned tables
pub const DEFAULT_SILVER_DIR: &str = "data/silver/cmapss";
/// Default gold-tier directory for feature tables and scaler bounds
pub const DEFAULT_GOLD_DIR: &str = "data/gold/cmapss";

const ENV_PREFIX: &str = "CMAPSS";
const LIST_KEYS: [&str; 3] = ["features.windows", "features.lags", "features.ewma_spans"];

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub dataset: DatasetVariant,
    /// Directory holding the raw `train_*`, `test_*` and `RUL_*` files
    pub data_dir: PathBuf,
    pub silver_dir: PathBuf,
    pub gold_dir: PathBuf,
    pub filter: FilterConfig,
    pub features: FeatureConfig,
    /// Also engineer the test split with the training scaler
    pub include_test: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetVariant::FD001,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            silver_dir: PathBuf::from(DEFAULT_SILVER_DIR),
            gold_dir: PathBuf::from(DEFAULT_GOLD_DIR),
            filter: FilterConfig::default(),
            features: FeatureConfig::default(),
            include_test: false,
        }
    }
}

impl PipelineConfig {
    /// Load configuration, reading `path` if given and present
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, PipelineError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let config = builder.add_source(env).build()?.try_deserialize()?;
        Ok(config)
    }

    /// Send silver and gold outputs under one root directory
    pub fn with_output_dir(mut self, root: impl AsRef<Path>) -> Self {
        self.silver_dir = root.as_ref().join("silver");
        self.gold_dir = root.as_ref().join("gold");
        self
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.silver_dir.join(format!("{}_cleaned.csv", self.dataset))
    }

    pub fn featured_path(&self) -> PathBuf {
        self.gold_dir.join(format!("{}_featured.csv", self.dataset))
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.gold_dir.join(format!("{}_scaler.json", self.dataset))
    }

    pub fn test_featured_path(&self) -> PathBuf {
        self.gold_dir.join(format!("{}_test_featured.csv", self.dataset))
    }
}

fn environment() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .try_parsing(true),
        |env, key| env.with_list_parse_key(key),
    )
}
