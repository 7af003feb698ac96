use crate::backend::domain::balance_service::Totals;
use crate::backend::domain::monthly_summary::MonthlySummary;
use crate::backend::domain::transaction_table::format_currency;
use shared::{ChartPoint, TotalsSummary};

pub struct SummaryMapper;

impl SummaryMapper {
    pub fn to_summary(totals: Totals) -> TotalsSummary {
        TotalsSummary {
            income: totals.income_sum,
            expense: totals.expense_sum,
            balance: totals.balance,
            formatted_income: format_currency(totals.income_sum),
            formatted_expense: format_currency(totals.expense_sum),
            formatted_balance: format_currency(totals.balance),
            is_positive: totals.balance >= 0.0,
        }
    }

    pub fn to_chart_point(month: MonthlySummary) -> ChartPoint {
        ChartPoint {
            label: month.label,
            income: month.income,
            expense: month.expense,
        }
    }
}
