//! # Domain Module
//!
//! Business rules of the ledger, independent of storage and UI.
//!
//! - **transaction_service**: the ordered transaction store (add, update,
//!   delete, list) and its cached totals
//! - **balance_service**: income, expense and balance totals
//! - **monthly_summary**: trailing month buckets for the bar chart
//! - **receipt_service**: receipt validation, encoding and viewing
//! - **edit_session**: transient form state (edit target, pending receipt)
//! - **money_management**: parsing and validation of form input
//! - **transaction_table**: currency and date display formatting
//! - **providers**: injected clock and id generator
//!
//! ## Rules
//!
//! - Amounts are stored as absolute values; the sign comes from the type
//! - Ids are assigned once and never change or repeat
//! - Totals always cover the whole ledger, never the filtered view
//! - A receipt belongs to exactly one transaction and is stored inside it

pub mod balance_service;
pub mod edit_session;
pub mod errors;
pub mod models;
pub mod money_management;
pub mod monthly_summary;
pub mod providers;
pub mod receipt_service;
pub mod transaction_service;
pub mod transaction_table;

pub use balance_service::Totals;
pub use edit_session::{AttachTicket, EditSession};
pub use errors::{LedgerError, RejectReason, Result};
pub use monthly_summary::MonthlySummary;
pub use providers::{Clock, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock, TimestampIdGenerator};
pub use receipt_service::{CandidateFile, ReceiptService, ReceiptView, MAX_RECEIPT_BYTES};
pub use transaction_service::TransactionService;
