// Controle Financeiro ledger core
pub mod backend;

pub use backend::{Ledger, LedgerConfig, LedgerDependencies, LedgerError, RejectReason, SubmitOutcome};
