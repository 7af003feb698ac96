//! Transaction repository: the whole transaction list as one JSON blob.

use anyhow::Result;
use log::{info, warn};
use serde_json::Value;

use super::traits::KeyValueStorage;
use crate::backend::domain::models::Transaction;

/// Storage key used by every previous version of the ledger
pub const DEFAULT_STORAGE_KEY: &str = "controle-financeiro-transacoes";

#[derive(Debug, Clone)]
pub struct TransactionRepository<S: KeyValueStorage> {
    storage: S,
    key: String,
    /// Stored records that could not be read, written back untouched
    unreadable: Vec<Value>,
}

impl<S: KeyValueStorage> TransactionRepository<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
            unreadable: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Number of stored records kept aside because they could not be read
    pub fn unreadable_count(&self) -> usize {
        self.unreadable.len()
    }

    /// Load every stored transaction in stored order.
    ///
    /// An absent blob is an empty ledger. A blob that is not a JSON array is
    /// treated as malformed and also yields an empty ledger. Individual
    /// records that cannot be read are left out of the result but kept by the
    /// repository, and every later `save` writes them back after the readable
    /// ones.
    pub fn load(&mut self) -> Result<Vec<Transaction>> {
        self.unreadable.clear();
        let transactions = match self.storage.get(&self.key)? {
            Some(blob) => self.decode(&blob),
            None => {
                info!("No stored transactions under '{}', starting empty", self.key);
                Vec::new()
            }
        };
        info!(
            "Loaded {} transactions ({} unreadable kept aside)",
            transactions.len(),
            self.unreadable.len()
        );
        Ok(transactions)
    }

    /// Overwrite the stored blob with the full transaction list
    pub fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let mut records = transactions
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<Value>>>()?;
        records.extend(self.unreadable.iter().cloned());

        let blob = serde_json::to_string(&records)?;
        self.storage.set(&self.key, &blob)?;
        info!("Saved {} transactions", transactions.len());
        Ok(())
    }

    fn decode(&mut self, blob: &str) -> Vec<Transaction> {
        if blob.trim().is_empty() {
            return Vec::new();
        }

        let records: Vec<Value> = match serde_json::from_str(blob) {
            Ok(records) => records,
            Err(e) => {
                warn!("Stored transactions are malformed ({}), starting with an empty ledger", e);
                return Vec::new();
            }
        };

        let mut transactions = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Transaction>(record.clone()) {
                Ok(transaction) => transactions.push(transaction),
                Err(e) => {
                    warn!("Keeping unreadable stored transaction #{} aside: {}", index, e);
                    self.unreadable.push(record);
                }
            }
        }
        transactions
    }
}
