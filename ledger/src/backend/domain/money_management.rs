//! Form input validation for transactions.
//!
//! Turns the raw text of the transaction form into checked values. Amounts
//! follow one policy:
//!
//! - surrounding whitespace, an `R$` symbol and inner spaces are ignored
//! - with both `.` and `,` present, `.` groups thousands and `,` is the
//!   decimal mark (`1.234,56`)
//! - a lone `,` is the decimal mark (`12,50`)
//! - empty, unparseable and non-finite input is rejected
//! - the stored value is the absolute value of the parsed number

use chrono::NaiveDate;
use shared::TransactionForm;

use super::errors::{LedgerError, Result};
use super::models::TransactionType;
use crate::backend::io::mappers::transaction_mapper::TransactionMapper;

/// Form values after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    pub description: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
}

pub fn validate_form(form: &TransactionForm) -> Result<ValidatedEntry> {
    Ok(ValidatedEntry {
        description: clean_description(&form.description)?,
        amount: parse_amount(&form.amount)?,
        transaction_type: TransactionMapper::to_domain_type(form.transaction_type),
        date: parse_date(&form.date)?,
    })
}

/// Trim the description, rejecting blank input
pub fn clean_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

pub fn parse_amount(amount_input: &str) -> Result<f64> {
    let invalid = || LedgerError::InvalidAmount(amount_input.to_string());

    let cleaned: String = amount_input
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(invalid());
    }

    let normalized = if cleaned.contains(',') {
        if cleaned.matches(',').count() > 1 {
            return Err(invalid());
        }
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    let amount = normalized.parse::<f64>().map_err(|_| invalid())?;
    if !amount.is_finite() {
        return Err(invalid());
    }
    Ok(amount.abs())
}

/// Parse a `yyyy-mm-dd` calendar date
pub fn parse_date(date_input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_input.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(date_input.to_string()))
}
