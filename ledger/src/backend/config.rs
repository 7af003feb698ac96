//! Ledger configuration, persisted as `ledger_config.yaml` in the data directory.
//!
//! ```yaml
//! storage_key: "controle-financeiro-transacoes"
//! chart_months: 12
//! ```

use serde::{Deserialize, Serialize};

use crate::backend::storage::transaction_repository::DEFAULT_STORAGE_KEY;

/// Number of trailing months shown in the bar chart
pub const DEFAULT_CHART_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Key under which the transaction blob is stored
    pub storage_key: String,
    /// Months covered by the income/expense chart
    pub chart_months: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            chart_months: DEFAULT_CHART_MONTHS,
        }
    }
}
