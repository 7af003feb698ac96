//! Error types surfaced by the ledger.
use std::fmt;
use thiserror::Error;

/// Why a candidate receipt file was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnsupportedType,
    TooLarge,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnsupportedType => write!(f, "unsupported file type, use PNG, JPEG or PDF"),
            RejectReason::TooLarge => write!(f, "file too large, maximum size is 2 MB"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Receipt rejected: {0}")]
    ReceiptRejected(RejectReason),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Invalid date (expected yyyy-mm-dd): {0:?}")]
    InvalidDate(String),

    #[error("Failed to read receipt file: {0}")]
    ReadFailure(#[source] std::io::Error),

    #[error("Malformed receipt payload: {0}")]
    MalformedReceipt(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    /// The rejection reason, when this error is a refused receipt
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            LedgerError::ReceiptRejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
