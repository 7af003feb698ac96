//! # Storage Traits
//!
//! Abstractions over the persistence medium and the file reader so the
//! domain layer can run against real files, memory, or test doubles.

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Opaque key-value blob store.
///
/// Each value is a whole serialized document; there are no partial reads or
/// writes. Implementations must make `set` all-or-nothing: after a failed
/// `set` the previous value is still readable.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Reads the raw bytes of a receipt file.
///
/// This is the one suspending operation in the ledger.
#[async_trait]
pub trait ByteReader: Send + Sync {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}
