//! # File Storage
//!
//! Stores each key as a JSON file in the data directory:
//!
//! ```text
//! ~/Documents/Controle Financeiro/
//! ├── ledger_config.yaml
//! └── controle-financeiro-transacoes.json
//! ```
//!
//! Writes go to a temporary sibling file which is then renamed over the
//! target, so a crash leaves either the old blob or the new one.

use anyhow::{anyhow, Result};
use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStorage;

const DATA_DIRECTORY_NAME: &str = "Controle Financeiro";

/// Default data directory: `<Documents>/Controle Financeiro`, falling back
/// to the home directory when the platform has no documents folder.
pub fn default_data_directory() -> Result<PathBuf> {
    let parent = dirs::document_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(parent.join(DATA_DIRECTORY_NAME))
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_directory: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a file storage in the default data directory
    pub fn new_default() -> Result<Self> {
        Self::new(default_data_directory()?)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file backing `key`
    pub fn path_for_key(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", Self::safe_file_stem(key)))
    }

    fn safe_file_stem(key: &str) -> String {
        let stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            "_".to_string()
        } else {
            stem
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for_key(key);
        if !path.exists() {
            debug!("No stored value for key '{}' at {}", key, path.display());
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for_key(key);
        let temp_path = path.with_extension("json.tmp");

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!("Wrote {} bytes for key '{}'", value.len(), key);
        Ok(())
    }
}
