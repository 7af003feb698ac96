pub mod receipt;
pub mod transaction;

pub use receipt::{Receipt, ReceiptMimeType};
pub use transaction::{Transaction, TransactionType};
