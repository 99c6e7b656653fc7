//! Dataset Loader Implementation

use crate::parser::{parse_readings, parse_truth};
use crate::rul::{label_test, label_train};
use crate::{DatasetVariant, LoaderError, Split};
use sensor_table::Table;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default bronze-tier directory for raw CMAPSS files
pub const DEFAULT_DATA_DIR: &str = "data/bronze/cmapss";

/// Loads CMAPSS splits from a data directory
#[derive(Debug, Clone)]
pub struct CmapssLoader {
    data_dir: PathBuf,
}

impl CmapssLoader {
    /// Create a loader rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `{split}_{dataset}.txt`
    pub fn readings_path(&self, variant: DatasetVariant, split: Split) -> PathBuf {
        self.data_dir.join(format!("{split}_{variant}.txt"))
    }

    /// `RUL_{dataset}.txt`
    pub fn truth_path(&self, variant: DatasetVariant) -> PathBuf {
        self.data_dir.join(format!("RUL_{variant}.txt"))
    }

    /// Load a split and label every row with its RUL
    pub fn load(&self, variant: DatasetVariant, split: Split) -> Result<Table, LoaderError> {
        let readings_path = self.readings_path(variant, split);
        let readings = open(&readings_path)?;
        let truth = match split {
            Split::Train => None,
            Split::Test => Some(open(&self.truth_path(variant))?),
        };

        debug!(
            "Parsing {} ({} conditions, {} fault modes)",
            readings_path.display(),
            variant.operating_conditions(),
            variant.fault_modes()
        );
        let table = parse_readings(readings)?;

        let table = match truth {
            None => label_train(table)?,
            Some(reader) => label_test(table, &parse_truth(reader)?)?,
        };

        info!(
            "Loaded {} {}: {} records, {} engines",
            variant,
            split,
            table.num_rows(),
            table.distinct_engines()?
        );
        Ok(table)
    }
}

impl Default for CmapssLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::DataNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_table::RUL;
    use std::fs;

    const TRAIN: &str = "1 1 0.1 0.2 100.0 518.67 641.82\n\
                         1 2 0.1 0.2 100.0 518.67 642.15\n\
                         1 3 0.1 0.2 100.0 518.67 642.35\n\
                         2 1 0.1 0.2 100.0 518.67 641.90\n\
                         2 2 0.1 0.2 100.0 518.67 642.00\n";

    #[test]
    fn test_load_train_split() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train_FD001.txt"), TRAIN).unwrap();

        let loader = CmapssLoader::new(dir.path());
        let table = loader.load(DatasetVariant::FD001, Split::Train).unwrap();
        assert_eq!(table.num_rows(), 5);
        assert_eq!(table.distinct_engines().unwrap(), 2);
        assert_eq!(table.values(RUL).unwrap(), &[2.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_load_test_split() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("test_FD002.txt"), TRAIN).unwrap();
        fs::write(dir.path().join("RUL_FD002.txt"), "30\n40\n").unwrap();

        let loader = CmapssLoader::new(dir.path());
        let table = loader.load(DatasetVariant::FD002, Split::Test).unwrap();
        assert_eq!(
            table.values(RUL).unwrap(),
            &[32.0, 31.0, 30.0, 42.0, 41.0]
        );
    }

    #[test]
    fn test_missing_readings_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CmapssLoader::new(dir.path());
        let err = loader.load(DatasetVariant::FD003, Split::Train).unwrap_err();
        match err {
            LoaderError::DataNotFound { path } => {
                assert!(path.ends_with("train_FD003.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_truth_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("test_FD004.txt"), TRAIN).unwrap();
        let loader = CmapssLoader::new(dir.path());
        let err = loader.load(DatasetVariant::FD004, Split::Test).unwrap_err();
        assert!(matches!(err, LoaderError::DataNotFound { ref path } if path.ends_with("RUL_FD004.txt")));
    }
}
