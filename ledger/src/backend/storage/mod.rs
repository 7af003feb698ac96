//! # Storage Module
//!
//! Persistence for the ledger. The domain only sees the [`KeyValueStorage`]
//! and [`ByteReader`] traits; everything here is swappable.
//!
//! - **file_storage**: one JSON file per key in the data directory
//! - **memory_storage**: in-process map, used by tests and throwaway ledgers
//! - **transaction_repository**: the transaction list as a single JSON blob
//! - **config_repository**: `ledger_config.yaml`
//! - **byte_reader**: reads receipt files from disk

pub mod byte_reader;
pub mod config_repository;
pub mod file_storage;
pub mod memory_storage;
pub mod traits;
pub mod transaction_repository;

#[cfg(test)]
pub mod test_utils;

pub use byte_reader::FsByteReader;
pub use config_repository::ConfigRepository;
pub use file_storage::{default_data_directory, FileStorage};
pub use memory_storage::MemoryStorage;
pub use traits::{ByteReader, KeyValueStorage};
pub use transaction_repository::{TransactionRepository, DEFAULT_STORAGE_KEY};
