//! Domain model for a ledger transaction.
//!
//! The serde field names are the persisted record shape
//! (`id, descricao, valor, tipo, data, comprovante`) and must stay stable so
//! previously saved ledgers keep loading.
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use super::receipt::Receipt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Receita,
    Despesa,
}

impl TransactionType {
    pub fn is_income(&self) -> bool {
        matches!(self, TransactionType::Receita)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Always non-negative; the sign comes from `transaction_type`
    #[serde(rename = "valor", deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(rename = "tipo")]
    pub transaction_type: TransactionType,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(
        rename = "comprovante",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_receipt"
    )]
    pub receipt: Option<Receipt>,
}

impl Transaction {
    /// Signed contribution of this transaction to the balance
    pub fn signed_amount(&self) -> f64 {
        if self.transaction_type.is_income() {
            self.amount
        } else {
            -self.amount
        }
    }

    pub fn has_receipt(&self) -> bool {
        self.receipt.is_some()
    }
}

/// Older ledgers may hold `null` where an unparseable amount was saved.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = Option::<f64>::deserialize(deserializer)?;
    match amount {
        Some(value) if value.is_finite() => Ok(value.abs()),
        _ => {
            warn!("Stored transaction has no valid amount, loading it as 0");
            Ok(0.0)
        }
    }
}

/// A missing or unrecognised `comprovante` means no attachment.
fn deserialize_receipt<'de, D>(deserializer: D) -> Result<Option<Receipt>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| match serde_json::from_value::<Receipt>(raw) {
        Ok(receipt) => Some(receipt.with_canonical_header()),
        Err(e) => {
            warn!("Ignoring unrecognised receipt on stored transaction: {}", e);
            None
        }
    }))
}
