//! # Backend Module
//!
//! Contains all non-UI logic of the ledger.
//!
//! - **Domain**: transaction store, totals, monthly aggregation, receipts and
//!   the edit session
//! - **Storage**: key-value persistence of the transaction blob and the
//!   configuration file
//! - **IO**: mappers from domain models to the `shared` DTOs a UI binds to
//!
//! ## Architecture
//!
//! ```text
//! UI (renders shared DTOs)
//!     ↓
//! Ledger facade (this module)
//!     ↓
//! Domain services  →  IO mappers
//!     ↓
//! Storage (FileStorage / MemoryStorage)
//! ```
//!
//! The [`Ledger`] facade owns every service and the transient edit session.
//! It is single threaded: the only suspend point is reading receipt bytes.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use log::{debug, info};
use shared::{
    ChartSeries, EditFormState, ReceiptPreview, TotalsSummary, TransactionFilter, TransactionForm, TransactionRow,
};
use std::path::Path;
use std::sync::Arc;

use crate::backend::domain::models::{Receipt, Transaction};
use crate::backend::domain::{
    AttachTicket, CandidateFile, Clock, EditSession, IdGenerator, MonthlySummary, ReceiptService, ReceiptView, Result,
    SystemClock, TimestampIdGenerator, Totals, TransactionService,
};
use crate::backend::io::mappers::{SummaryMapper, TransactionMapper};
use crate::backend::storage::{
    default_data_directory, ByteReader, ConfigRepository, FileStorage, FsByteReader, KeyValueStorage,
    TransactionRepository,
};

pub use config::LedgerConfig;
pub use domain::errors::{LedgerError, RejectReason};

/// Injected collaborators of the [`Ledger`]
#[derive(Clone)]
pub struct LedgerDependencies {
    pub clock: Arc<dyn Clock>,
    pub id_generator: Arc<dyn IdGenerator>,
    pub byte_reader: Arc<dyn ByteReader>,
}

impl Default for LedgerDependencies {
    fn default() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            id_generator: Arc::new(TimestampIdGenerator::new(clock.clone())),
            clock,
            byte_reader: Arc::new(FsByteReader),
        }
    }
}

/// What a form submission did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Added(Transaction),
    Updated(String),
    /// The transaction being edited no longer exists; nothing was written
    NotFound(String),
}

pub struct Ledger<S: KeyValueStorage = FileStorage> {
    config: LedgerConfig,
    transactions: TransactionService<S>,
    receipts: ReceiptService,
    session: EditSession,
    clock: Arc<dyn Clock>,
}

impl Ledger<FileStorage> {
    /// Open the ledger stored in `data_directory`, creating the directory and
    /// a default config file when missing
    pub fn open<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let storage = FileStorage::new(data_directory)?;
        let config = ConfigRepository::new(storage.clone()).load_or_create()?;
        Self::with_parts(storage, config, LedgerDependencies::default())
    }

    /// Open the ledger in `<Documents>/Controle Financeiro`
    pub fn open_default() -> Result<Self> {
        Self::open(default_data_directory()?)
    }
}

impl<S: KeyValueStorage> Ledger<S> {
    pub fn with_parts(storage: S, config: LedgerConfig, dependencies: LedgerDependencies) -> Result<Self> {
        let repository = TransactionRepository::with_key(storage, &config.storage_key);
        let transactions = TransactionService::load(repository, dependencies.id_generator)?;
        info!(
            "Ledger ready with {} transactions under key '{}'",
            transactions.len(),
            config.storage_key
        );

        Ok(Self {
            config,
            transactions,
            receipts: ReceiptService::new(dependencies.byte_reader),
            session: EditSession::new(),
            clock: dependencies.clock,
        })
    }

    /// Install an `env_logger` logger (level from `RUST_LOG`, `info` by
    /// default). Safe to call more than once.
    pub fn init_logging() {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn transactions(&self) -> &TransactionService<S> {
        &self.transactions
    }

    pub fn totals(&self) -> Totals {
        self.transactions.totals()
    }

    pub fn summary(&self) -> TotalsSummary {
        SummaryMapper::to_summary(self.transactions.totals())
    }

    pub fn list(&self, filter: TransactionFilter) -> Vec<&Transaction> {
        self.transactions.list(filter)
    }

    pub fn rows(&self, filter: TransactionFilter) -> Vec<TransactionRow> {
        self.transactions
            .list(filter)
            .into_iter()
            .map(TransactionMapper::to_row)
            .collect()
    }

    pub fn monthly_series(&self, month_count: u32) -> Vec<MonthlySummary> {
        self.transactions.monthly_series(self.clock.today(), month_count)
    }

    /// Chart series over the configured number of months
    pub fn chart(&self) -> ChartSeries {
        self.chart_with_months(self.config.chart_months)
    }

    pub fn chart_with_months(&self, month_count: u32) -> ChartSeries {
        self.monthly_series(month_count)
            .into_iter()
            .map(SummaryMapper::to_chart_point)
            .collect::<Vec<_>>()
            .into()
    }

    /// Start editing `id`. Returns the values to put in the form, or `None`
    /// (and leaves the session alone) when the id is unknown.
    pub fn begin_edit(&mut self, id: &str) -> Option<EditFormState> {
        let transaction = self.transactions.get(id)?;
        let form = TransactionMapper::to_edit_form(transaction);
        self.session.begin_edit(id);
        debug!("Editing transaction {}", id);
        Some(form)
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.session.editing_id()
    }

    /// Add a new transaction or update the one being edited.
    ///
    /// On success the session is reset. On failure it is left as it was so
    /// the user can correct the form.
    pub fn submit(&mut self, form: &TransactionForm) -> Result<SubmitOutcome> {
        let pending = self.session.pending_receipt().cloned();

        let outcome = match self.session.editing_id().map(str::to_string) {
            Some(id) => {
                let remove_receipt = self.session.remove_existing_receipt();
                if self.transactions.update(&id, form, pending, remove_receipt)? {
                    SubmitOutcome::Updated(id)
                } else {
                    SubmitOutcome::NotFound(id)
                }
            }
            None => SubmitOutcome::Added(self.transactions.add(form, pending)?),
        };

        self.session.cancel();
        Ok(outcome)
    }

    /// Delete `id`, ending the edit session if it was the one being edited
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let removed = self.transactions.delete(id)?;
        if removed && self.session.is_editing(id) {
            self.session.cancel();
        }
        Ok(removed)
    }

    pub fn receipt_service(&self) -> &ReceiptService {
        &self.receipts
    }

    /// Validate a candidate and register a new read for it, superseding any
    /// read still in flight. Rejected candidates leave the session untouched.
    pub fn begin_attach(&mut self, candidate: &CandidateFile) -> Result<AttachTicket> {
        ReceiptService::validate_candidate(candidate)?;
        Ok(self.session.begin_attach())
    }

    /// Stage the outcome of a read started with [`Ledger::begin_attach`].
    ///
    /// Returns the preview of the staged receipt, or `None` when a newer
    /// attach has superseded this one, whether its read succeeded or not.
    /// A failed read on the current ticket is returned as is.
    pub fn complete_attach(
        &mut self,
        ticket: AttachTicket,
        read: Result<Receipt>,
    ) -> Result<Option<ReceiptPreview>> {
        if !self.session.is_current(ticket) {
            debug!("Discarding superseded receipt read");
            return Ok(None);
        }
        let receipt = read?;
        self.session.complete_attach(ticket, receipt);
        Ok(self.pending_receipt_preview())
    }

    /// Validate, read and stage a receipt for the current form
    pub async fn attach_receipt(&mut self, candidate: &CandidateFile) -> Result<Option<ReceiptPreview>> {
        let ticket = self.begin_attach(candidate)?;
        let read = self.receipts.read_receipt(candidate).await;
        self.complete_attach(ticket, read)
    }

    /// Drop the pending receipt and, while editing, the saved one on submit
    pub fn remove_receipt(&mut self) {
        self.session.mark_for_removal();
    }

    pub fn pending_receipt_preview(&self) -> Option<ReceiptPreview> {
        self.session.pending_receipt().map(ReceiptService::preview)
    }

    /// Decode the receipt stored on `id` for display
    pub fn view_receipt(&self, id: &str) -> Result<Option<ReceiptView>> {
        match self.transactions.get(id).and_then(|t| t.receipt.as_ref()) {
            Some(receipt) => ReceiptService::open_for_viewing(receipt).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::ReceiptMimeType;
    use crate::backend::domain::monthly_summary::MAX_SERIES_MONTHS;
    use crate::backend::domain::{FixedClock, SequentialIdGenerator};
    use crate::backend::storage::test_utils::{StaticByteReader, TestEnvironment};
    use crate::backend::storage::MemoryStorage;
    use chrono::NaiveDate;
    use shared::TransactionType;

    const PNG_PATH: &str = "/tmp/recibo.png";
    const PDF_PATH: &str = "/tmp/nota.pdf";

    fn dependencies() -> LedgerDependencies {
        let reader = StaticByteReader::new()
            .with_file(PNG_PATH, b"\x89PNG\r\n")
            .with_file(PDF_PATH, b"%PDF-1.7");
        LedgerDependencies {
            clock: Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())),
            id_generator: Arc::new(SequentialIdGenerator::new()),
            byte_reader: Arc::new(reader),
        }
    }

    fn create_test_ledger() -> (Ledger<Arc<MemoryStorage>>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let ledger = Ledger::with_parts(storage.clone(), LedgerConfig::default(), dependencies()).unwrap();
        (ledger, storage)
    }

    fn form(description: &str, amount: &str, transaction_type: TransactionType, date: &str) -> TransactionForm {
        TransactionForm {
            description: description.to_string(),
            amount: amount.to_string(),
            transaction_type,
            date: date.to_string(),
        }
    }

    fn png() -> CandidateFile {
        CandidateFile::new(PNG_PATH, "image/png", 6)
    }

    #[test]
    fn test_submit_adds_when_not_editing() {
        let (mut ledger, _) = create_test_ledger();
        let outcome = ledger
            .submit(&form("Salário", "1000", TransactionType::Receita, "2024-01-15"))
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Added(ref t) if t.id == "tx-1"));

        let summary = ledger.summary();
        assert_eq!(summary.formatted_balance, "R$ 1.000,00");
        assert!(summary.is_positive);
    }

    #[test]
    fn test_rows_are_formatted_and_filtered() {
        let (mut ledger, _) = create_test_ledger();
        ledger.submit(&form("Salário", "1000", TransactionType::Receita, "2024-01-15")).unwrap();
        ledger.submit(&form("Aluguel", "400", TransactionType::Despesa, "2024-01-20")).unwrap();

        let rows = ledger.rows(TransactionFilter::Despesa);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Aluguel");
        assert_eq!(rows[0].formatted_amount, "- R$ 400,00");
        assert_eq!(rows[0].formatted_date, "20/01/2024");
        assert_eq!(ledger.rows(TransactionFilter::Todos).len(), 2);
    }

    #[test]
    fn test_edit_flow_updates_in_place() {
        let (mut ledger, _) = create_test_ledger();
        ledger.submit(&form("Mercado", "80", TransactionType::Despesa, "2024-02-01")).unwrap();

        let state = ledger.begin_edit("tx-1").unwrap();
        assert_eq!(state.amount, "80");
        assert_eq!(state.date, "2024-02-01");
        assert!(!state.show_remove_receipt);
        assert_eq!(ledger.editing_id(), Some("tx-1"));

        let outcome = ledger
            .submit(&form("Mercado", "95,50", TransactionType::Despesa, "2024-02-01"))
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated("tx-1".to_string()));
        assert_eq!(ledger.editing_id(), None);
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.totals().expense_sum, 95.5);
    }

    #[test]
    fn test_begin_edit_unknown_id() {
        let (mut ledger, _) = create_test_ledger();
        assert!(ledger.begin_edit("missing").is_none());
        assert_eq!(ledger.editing_id(), None);
    }

    #[test]
    fn test_invalid_submit_keeps_session() {
        let (mut ledger, storage) = create_test_ledger();
        ledger.submit(&form("Mercado", "80", TransactionType::Despesa, "2024-02-01")).unwrap();
        ledger.begin_edit("tx-1");

        let err = ledger
            .submit(&form("Mercado", "oitenta", TransactionType::Despesa, "2024-02-01"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(ledger.editing_id(), Some("tx-1"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_submit_after_concurrent_delete_reports_not_found() {
        let (mut ledger, _) = create_test_ledger();
        ledger.submit(&form("A", "1", TransactionType::Receita, "2024-02-01")).unwrap();
        ledger.submit(&form("B", "2", TransactionType::Receita, "2024-02-01")).unwrap();
        ledger.begin_edit("tx-1");
        // another path removes the row without going through the session
        ledger.transactions.delete("tx-1").unwrap();

        let outcome = ledger.submit(&form("A2", "3", TransactionType::Receita, "2024-02-01")).unwrap();
        assert_eq!(outcome, SubmitOutcome::NotFound("tx-1".to_string()));
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.editing_id(), None);
    }

    #[test]
    fn test_delete_of_edited_transaction_ends_session() {
        let (mut ledger, _) = create_test_ledger();
        ledger.submit(&form("A", "1", TransactionType::Receita, "2024-02-01")).unwrap();
        ledger.submit(&form("B", "2", TransactionType::Receita, "2024-02-01")).unwrap();

        ledger.begin_edit("tx-2");
        assert!(ledger.delete("tx-1").unwrap());
        assert_eq!(ledger.editing_id(), Some("tx-2"));

        assert!(ledger.delete("tx-2").unwrap());
        assert_eq!(ledger.editing_id(), None);
        assert!(!ledger.delete("tx-2").unwrap());
    }

    #[tokio::test]
    async fn test_attach_receipt_is_saved_with_new_transaction() {
        let (mut ledger, _) = create_test_ledger();
        let preview = ledger.attach_receipt(&png()).await.unwrap().unwrap();
        assert_eq!(preview.file_name, "recibo.png");
        assert!(!preview.is_pdf);
        assert!(preview.thumbnail_data_url.unwrap().starts_with("data:image/png;base64,"));

        ledger.submit(&form("Farmácia", "30", TransactionType::Despesa, "2024-02-03")).unwrap();
        assert!(ledger.pending_receipt_preview().is_none());

        let view = ledger.view_receipt("tx-1").unwrap().unwrap();
        assert_eq!(view.bytes, b"\x89PNG\r\n");
        assert_eq!(view.mime_type, ReceiptMimeType::Png);
    }

    #[tokio::test]
    async fn test_attach_rejections_leave_session_untouched() {
        let (mut ledger, _) = create_test_ledger();
        ledger.attach_receipt(&png()).await.unwrap();

        let gif = CandidateFile::new("/tmp/anim.gif", "image/gif", 1000);
        let err = ledger.attach_receipt(&gif).await.unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::UnsupportedType));

        let huge = CandidateFile::new(PNG_PATH, "image/png", 3 * 1024 * 1024);
        let err = ledger.attach_receipt(&huge).await.unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::TooLarge));

        let missing = CandidateFile::new("/tmp/sumiu.pdf", "application/pdf", 10);
        assert!(matches!(
            ledger.attach_receipt(&missing).await,
            Err(LedgerError::ReadFailure(_))
        ));

        assert_eq!(ledger.pending_receipt_preview().unwrap().file_name, "recibo.png");
    }

    #[tokio::test]
    async fn test_superseded_read_is_discarded() {
        let (mut ledger, _) = create_test_ledger();
        let pdf = CandidateFile::new(PDF_PATH, "application/pdf", 8);

        let first = ledger.begin_attach(&png()).unwrap();
        let second = ledger.begin_attach(&pdf).unwrap();

        let pdf_read = ledger.receipt_service().read_receipt(&pdf).await;
        let png_read = ledger.receipt_service().read_receipt(&png()).await;

        let preview = ledger.complete_attach(second, pdf_read).unwrap().unwrap();
        assert!(preview.is_pdf);
        assert_eq!(ledger.complete_attach(first, png_read).unwrap(), None);
        assert_eq!(ledger.pending_receipt_preview().unwrap().file_name, "nota.pdf");
    }

    #[tokio::test]
    async fn test_superseded_failed_read_is_discarded_silently() {
        let (mut ledger, _) = create_test_ledger();
        let missing = CandidateFile::new("/tmp/sumiu.pdf", "application/pdf", 10);

        let first = ledger.begin_attach(&missing).unwrap();
        let second = ledger.begin_attach(&png()).unwrap();

        let failed_read = ledger.receipt_service().read_receipt(&missing).await;
        assert!(failed_read.is_err());
        assert_eq!(ledger.complete_attach(first, failed_read).unwrap(), None);

        let png_read = ledger.receipt_service().read_receipt(&png()).await;
        assert!(ledger.complete_attach(second, png_read).unwrap().is_some());
        assert_eq!(ledger.pending_receipt_preview().unwrap().file_name, "recibo.png");
    }

    #[tokio::test]
    async fn test_current_failed_read_is_reported() {
        let (mut ledger, _) = create_test_ledger();
        let missing = CandidateFile::new("/tmp/sumiu.pdf", "application/pdf", 10);
        let ticket = ledger.begin_attach(&missing).unwrap();
        let failed_read = ledger.receipt_service().read_receipt(&missing).await;
        assert!(matches!(
            ledger.complete_attach(ticket, failed_read),
            Err(LedgerError::ReadFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_read_completing_after_cancel_is_discarded() {
        let (mut ledger, _) = create_test_ledger();
        let ticket = ledger.begin_attach(&png()).unwrap();
        ledger.cancel_edit();
        let read = ledger.receipt_service().read_receipt(&png()).await;
        assert_eq!(ledger.complete_attach(ticket, read).unwrap(), None);
        assert!(ledger.pending_receipt_preview().is_none());
    }

    #[tokio::test]
    async fn test_edit_replace_and_remove_receipt() {
        let (mut ledger, _) = create_test_ledger();
        ledger.attach_receipt(&png()).await.unwrap();
        let f = form("Consulta", "200", TransactionType::Despesa, "2024-02-05");
        ledger.submit(&f).unwrap();

        let state = ledger.begin_edit("tx-1").unwrap();
        assert!(state.show_remove_receipt);
        assert_eq!(state.receipt_preview.unwrap().file_name, "recibo.png");

        // replace
        let pdf = CandidateFile::new(PDF_PATH, "application/pdf", 8);
        ledger.attach_receipt(&pdf).await.unwrap();
        ledger.submit(&f).unwrap();
        assert_eq!(ledger.view_receipt("tx-1").unwrap().unwrap().file_name, "nota.pdf");

        // edit without touching the receipt keeps it
        ledger.begin_edit("tx-1");
        ledger.submit(&f).unwrap();
        assert!(ledger.view_receipt("tx-1").unwrap().is_some());

        // remove
        ledger.begin_edit("tx-1");
        ledger.remove_receipt();
        ledger.submit(&f).unwrap();
        assert!(ledger.view_receipt("tx-1").unwrap().is_none());
    }

    #[test]
    fn test_chart_uses_configured_months() {
        let storage = Arc::new(MemoryStorage::new());
        let config = LedgerConfig {
            chart_months: 2,
            ..LedgerConfig::default()
        };
        let mut ledger = Ledger::with_parts(storage, config, dependencies()).unwrap();
        ledger.submit(&form("Freela", "100", TransactionType::Receita, "2024-01-10")).unwrap();
        ledger.submit(&form("Luz", "50", TransactionType::Despesa, "2024-02-03")).unwrap();

        let chart = ledger.chart();
        assert_eq!(chart.labels, vec!["Jan/2024", "Fev/2024"]);
        assert_eq!(chart.income, vec![100.0, 0.0]);
        assert_eq!(chart.expense, vec![0.0, 50.0]);
        assert_eq!(ledger.chart_with_months(12).labels.len(), 12);
    }

    #[test]
    fn test_oversized_chart_months_still_draws_a_chart() {
        let storage = Arc::new(MemoryStorage::new());
        let config = LedgerConfig {
            chart_months: u32::MAX,
            ..LedgerConfig::default()
        };
        let ledger = Ledger::with_parts(storage, config, dependencies()).unwrap();
        let chart = ledger.chart();
        assert_eq!(chart.labels.len(), MAX_SERIES_MONTHS as usize);
        assert_eq!(chart.labels.last().map(String::as_str), Some("Fev/2024"));
    }

    #[test]
    fn test_open_persists_between_sessions() {
        let env = TestEnvironment::new().unwrap();
        {
            let mut ledger = Ledger::open(env.base_directory()).unwrap();
            ledger.submit(&form("Salário", "1000", TransactionType::Receita, "2024-01-15")).unwrap();
        }
        assert!(env.base_directory().join("ledger_config.yaml").exists());

        let ledger = Ledger::open(env.base_directory()).unwrap();
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.totals().income_sum, 1000.0);
        assert_eq!(ledger.config(), &LedgerConfig::default());
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        Ledger::<FileStorage>::init_logging();
        Ledger::<FileStorage>::init_logging();
    }
}
