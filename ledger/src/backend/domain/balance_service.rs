//! Running totals for the summary cards.
//!
//! Totals are always computed over the full ledger, never over the filtered
//! list the user is looking at.

use super::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income_sum: f64,
    pub expense_sum: f64,
    /// `income_sum - expense_sum`
    pub balance: f64,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income_sum, expense_sum) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), transaction| {
                if transaction.transaction_type.is_income() {
                    (income + transaction.amount, expense)
                } else {
                    (income, expense + transaction.amount)
                }
            });

    Totals {
        income_sum,
        expense_sum,
        balance: income_sum - expense_sum,
    }
}
