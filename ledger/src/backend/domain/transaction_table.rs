//! Display formatting for the transaction list and summary cards.
//!
//! One scheme only: Brazilian real with pt-BR separators (`R$ 1.234,56`)
//! and `dd/mm/yyyy` dates.

use chrono::NaiveDate;

use super::models::Transaction;

/// Format a value as currency, e.g. `R$ 1.234,56` or `-R$ 600,00`
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Amount with the sign implied by the transaction type, e.g. `+ R$ 10,00`
pub fn format_signed_amount(transaction: &Transaction) -> String {
    let sign = if transaction.transaction_type.is_income() { '+' } else { '-' };
    format!("{} {}", sign, format_currency(transaction.amount))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Render the amount back into the form's number field
pub fn format_amount_input(amount: f64) -> String {
    amount.to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
