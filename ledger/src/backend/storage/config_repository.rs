//! # Config Repository
//!
//! Keeps the ledger configuration in a single YAML file at the root of the
//! data directory, next to the transaction blob.

use anyhow::Result;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

use super::file_storage::FileStorage;
use crate::backend::config::LedgerConfig;

const CONFIG_FILE_NAME: &str = "ledger_config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigRepository {
    storage: FileStorage,
}

impl ConfigRepository {
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    fn config_path(&self) -> PathBuf {
        self.storage.base_directory().join(CONFIG_FILE_NAME)
    }

    /// Load the config file, writing the defaults first if it does not exist
    pub fn load_or_create(&self) -> Result<LedgerConfig> {
        let config_path = self.config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: LedgerConfig = serde_yaml::from_str(&yaml_content)?;
            debug!("Loaded ledger config from {:?}", config_path);
            Ok(config)
        } else {
            let config = LedgerConfig::default();
            self.save(&config)?;
            info!("Created default ledger config at {:?}", config_path);
            Ok(config)
        }
    }

    pub fn save(&self, config: &LedgerConfig) -> Result<()> {
        let config_path = self.config_path();
        let temp_path = config_path.with_extension("yaml.tmp");

        let yaml_content = serde_yaml::to_string(config)?;
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved ledger config to {:?}", config_path);
        Ok(())
    }
}
