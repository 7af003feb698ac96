//! Month-bucketed income and expense for the bar chart.

use chrono::{Datelike, NaiveDate};
use log::warn;

use super::models::Transaction;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Longest window a series may cover (100 years)
pub const MAX_SERIES_MONTHS: u32 = 1200;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    /// `Jan/2024` style label
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

/// Totals for the trailing `month_count` calendar months ending at the month
/// of `today`, oldest first. Counts above [`MAX_SERIES_MONTHS`] are capped.
pub fn monthly_series(transactions: &[Transaction], today: NaiveDate, month_count: u32) -> Vec<MonthlySummary> {
    let month_count = if month_count > MAX_SERIES_MONTHS {
        warn!(
            "Requested {} months, limiting the series to {}",
            month_count, MAX_SERIES_MONTHS
        );
        MAX_SERIES_MONTHS
    } else {
        month_count
    };
    let current = i64::from(today.year()) * 12 + i64::from(today.month0());

    (0..i64::from(month_count))
        .rev()
        .map(|offset| {
            let index = current - offset;
            let year = index.div_euclid(12) as i32;
            let month0 = index.rem_euclid(12) as u32;
            summarize_month(transactions, year, month0 + 1)
        })
        .collect()
}

fn summarize_month(transactions: &[Transaction], year: i32, month: u32) -> MonthlySummary {
    let mut income = 0.0;
    let mut expense = 0.0;

    for transaction in transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
    {
        if transaction.transaction_type.is_income() {
            income += transaction.amount;
        } else {
            expense += transaction.amount;
        }
    }

    MonthlySummary {
        year,
        month,
        label: format!("{}/{}", MONTH_NAMES[(month - 1) as usize], year),
        income,
        expense,
    }
}
