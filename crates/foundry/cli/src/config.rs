//! CLI configuration

use crate::error::{CliError, CliResult};
use foundry_types::{QualityThreshold, TrainRatio};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_DATASET: &str = "examples.jsonl";
const DEFAULT_EXPORT_DIR: &str = "export";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Dataset file
    pub dataset: Option<PathBuf>,

    /// Default fraction of qualified examples assigned to train
    pub train_ratio: Option<f64>,

    /// Default minimum rating for an example to be split
    pub quality_threshold: Option<i64>,

    /// Shuffle seed for reproducible splits
    pub seed: Option<u64>,

    /// Default export directory
    pub export_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_config_path() {
                Some(p) => p,
                None => return Ok(CliConfig::default()),
            },
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            tracing::debug!(path = %config_path.display(), "Loaded configuration");
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("foundry").join("config.toml"))
    }

    pub fn dataset_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.dataset.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET))
    }

    pub fn train_ratio(&self, flag: Option<f64>) -> CliResult<TrainRatio> {
        let value = flag.or(self.train_ratio).unwrap_or(TrainRatio::DEFAULT);
        Ok(TrainRatio::new(value)?)
    }

    pub fn quality_threshold(&self, flag: Option<i64>) -> CliResult<QualityThreshold> {
        let value = flag
            .or(self.quality_threshold)
            .unwrap_or(QualityThreshold::DEFAULT as i64);
        Ok(QualityThreshold::new(value)?)
    }

    pub fn seed(&self, flag: Option<u64>) -> Option<u64> {
        flag.or(self.seed)
    }

    pub fn export_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR))
    }

    /// Copy of this config with the resolved dataset filled in
    pub fn with_dataset(&self, dataset: PathBuf) -> Self {
        Self {
            dataset: Some(dataset),
            ..self.clone()
        }
    }
}
