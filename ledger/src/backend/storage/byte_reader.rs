//! Filesystem reader for receipt files.

use async_trait::async_trait;
use log::debug;
use std::path::Path;

use super::traits::ByteReader;

/// Reads receipt bytes from the local filesystem with `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsByteReader;

#[async_trait]
impl ByteReader for FsByteReader {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }
}
