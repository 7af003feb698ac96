//! Transaction store for the ledger.
//!
//! Holds the ordered transaction list in memory, persists the whole list after
//! every mutation and keeps the totals in step with it. Mutations are applied
//! to a copy and only become visible once the write has succeeded, so a
//! failed write leaves both memory and the stored blob as they were.
use chrono::NaiveDate;
use log::{debug, info};
use shared::{TransactionFilter, TransactionForm};
use std::sync::Arc;

use super::balance_service::{self, Totals};
use super::errors::Result;
use super::models::{Receipt, Transaction};
use super::money_management::validate_form;
use super::monthly_summary::{self, MonthlySummary};
use super::providers::IdGenerator;
use crate::backend::io::mappers::transaction_mapper::TransactionMapper;
use crate::backend::storage::{KeyValueStorage, TransactionRepository};

const MAX_ID_ATTEMPTS: usize = 8;

pub struct TransactionService<S: KeyValueStorage> {
    repository: TransactionRepository<S>,
    id_generator: Arc<dyn IdGenerator>,
    transactions: Vec<Transaction>,
    totals: Totals,
}

impl<S: KeyValueStorage> TransactionService<S> {
    /// Build the store from whatever the repository currently holds
    pub fn load(mut repository: TransactionRepository<S>, id_generator: Arc<dyn IdGenerator>) -> Result<Self> {
        let transactions = repository.load()?;
        let totals = balance_service::totals(&transactions);
        Ok(Self {
            repository,
            id_generator,
            transactions,
            totals,
        })
    }

    pub fn add(&mut self, form: &TransactionForm, receipt: Option<Receipt>) -> Result<Transaction> {
        let entry = validate_form(form)?;

        let transaction = Transaction {
            id: self.fresh_id(),
            description: entry.description,
            amount: entry.amount,
            transaction_type: entry.transaction_type,
            date: entry.date,
            receipt,
        };

        let mut staged = self.transactions.clone();
        staged.push(transaction.clone());
        self.commit(staged)?;

        info!(
            "Added transaction {} ({:?}, {:.2}, {})",
            transaction.id, transaction.transaction_type, transaction.amount, transaction.date
        );
        Ok(transaction)
    }

    /// Replace the transaction `id` in place, keeping its id and position.
    ///
    /// Receipt precedence: `remove_receipt` drops it, otherwise a new
    /// `receipt` replaces it, otherwise the existing one is kept.
    /// Returns `Ok(false)` without touching anything when `id` is unknown.
    pub fn update(
        &mut self,
        id: &str,
        form: &TransactionForm,
        receipt: Option<Receipt>,
        remove_receipt: bool,
    ) -> Result<bool> {
        let Some(index) = self.position(id) else {
            debug!("Update ignored, transaction {} not found", id);
            return Ok(false);
        };

        let entry = validate_form(form)?;
        let existing = &self.transactions[index];

        let receipt = if remove_receipt {
            None
        } else if receipt.is_some() {
            receipt
        } else {
            existing.receipt.clone()
        };

        let updated = Transaction {
            id: existing.id.clone(),
            description: entry.description,
            amount: entry.amount,
            transaction_type: entry.transaction_type,
            date: entry.date,
            receipt,
        };

        let mut staged = self.transactions.clone();
        staged[index] = updated;
        self.commit(staged)?;

        info!("Updated transaction {}", id);
        Ok(true)
    }

    /// Remove the transaction `id`. Returns `Ok(false)` when it does not exist.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.position(id) else {
            debug!("Delete ignored, transaction {} not found", id);
            return Ok(false);
        };

        let mut staged = self.transactions.clone();
        staged.remove(index);
        self.commit(staged)?;

        info!("Deleted transaction {}", id);
        Ok(true)
    }

    /// Transactions in store order, restricted by `filter`
    pub fn list(&self, filter: TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.matches(TransactionMapper::to_dto_type(t.transaction_type)))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Totals over the whole ledger, regardless of any list filter
    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn monthly_series(&self, today: NaiveDate, month_count: u32) -> Vec<MonthlySummary> {
        monthly_summary::monthly_series(&self.transactions, today, month_count)
    }

    /// Write the full list to storage
    pub fn persist(&self) -> Result<()> {
        self.repository.save(&self.transactions)?;
        Ok(())
    }

    pub fn repository(&self) -> &TransactionRepository<S> {
        &self.repository
    }

    fn commit(&mut self, staged: Vec<Transaction>) -> Result<()> {
        self.repository.save(&staged)?;
        self.transactions = staged;
        self.totals = balance_service::totals(&self.transactions);
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    fn fresh_id(&self) -> String {
        let mut candidate = self.id_generator.next_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if self.position(&candidate).is_none() {
                return candidate;
            }
            candidate = self.id_generator.next_id();
        }
        // Generator keeps colliding; make the last candidate unique by count.
        let mut suffix = self.transactions.len();
        let base = candidate;
        loop {
            let id = format!("{}-{}", base, suffix);
            if self.position(&id).is_none() {
                return id;
            }
            suffix += 1;
        }
    }
}
