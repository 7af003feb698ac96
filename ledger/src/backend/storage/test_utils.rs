/// Test utilities for storage-backed tests.
///
/// `TestEnvironment` owns a temporary directory that is removed when the
/// environment is dropped, even if the test panics.
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::file_storage::FileStorage;
use super::traits::ByteReader;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub storage: FileStorage,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let storage = FileStorage::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            storage,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Write a file inside the environment and return its path
    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.base_path.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

/// Byte reader serving canned contents by path; unknown paths fail with `NotFound`
#[derive(Default)]
pub struct StaticByteReader {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl StaticByteReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(PathBuf::from(path), bytes.to_vec());
        self
    }
}

#[async_trait]
impl ByteReader for StaticByteReader {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }
}
