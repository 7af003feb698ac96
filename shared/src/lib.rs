use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of transaction as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Receita,
    /// Money going out
    Despesa,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Receita => write!(f, "receita"),
            TransactionType::Despesa => write!(f, "despesa"),
        }
    }
}

/// List filter selected by the filter buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFilter {
    #[default]
    Todos,
    Receita,
    Despesa,
}

impl TransactionFilter {
    /// Whether a transaction of the given type passes this filter
    pub fn matches(&self, transaction_type: TransactionType) -> bool {
        match self {
            TransactionFilter::Todos => true,
            TransactionFilter::Receita => transaction_type == TransactionType::Receita,
            TransactionFilter::Despesa => transaction_type == TransactionType::Despesa,
        }
    }
}

impl FromStr for TransactionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "todos" => Ok(TransactionFilter::Todos),
            "receita" => Ok(TransactionFilter::Receita),
            "despesa" => Ok(TransactionFilter::Despesa),
            other => Err(format!("Unknown transaction filter: {}", other)),
        }
    }
}

/// Form values submitted when adding or saving a transaction.
///
/// `amount` is the raw text typed by the user; parsing happens in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub transaction_type: TransactionType,
    /// Calendar date in `yyyy-mm-dd` format
    pub date: String,
}

/// A single line of the transaction list, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub description: String,
    /// Date formatted as `dd/mm/yyyy`
    pub formatted_date: String,
    /// Signed amount, e.g. `+ R$ 1.000,00`
    pub formatted_amount: String,
    pub transaction_type: TransactionType,
    /// File name of the attached receipt, if any
    pub receipt_name: Option<String>,
}

/// Totals shown in the summary cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub formatted_income: String,
    pub formatted_expense: String,
    pub formatted_balance: String,
    /// True when the balance is zero or positive
    pub is_positive: bool,
}

/// One month of the income/expense bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Month label such as `Jan/2024`
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

/// Chart data split into the parallel arrays a bar chart consumes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

impl From<Vec<ChartPoint>> for ChartSeries {
    fn from(points: Vec<ChartPoint>) -> Self {
        let mut series = ChartSeries::default();
        for point in points {
            series.labels.push(point.label);
            series.income.push(point.income);
            series.expense.push(point.expense);
        }
        series
    }
}

/// How an attached receipt should be previewed next to the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptPreview {
    pub file_name: String,
    pub mime_type: String,
    /// Inline `data:` URL for image thumbnails; `None` for PDFs
    pub thumbnail_data_url: Option<String>,
    pub is_pdf: bool,
}

/// Values bound to the form when editing an existing transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditFormState {
    pub id: String,
    pub description: String,
    pub amount: String,
    pub transaction_type: TransactionType,
    pub date: String,
    pub receipt_preview: Option<ReceiptPreview>,
    /// Whether the "remove receipt" control should be shown
    pub show_remove_receipt: bool,
}
