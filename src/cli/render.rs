//! Plain-text renderers. Each call rebuilds its output from scratch.

use crate::core::format::{CurrencyFormatter, DateFormatter, DisplayFormat};
use crate::core::services::Aggregates;
use crate::ledger::SortedView;

pub const NO_TRANSACTIONS: &str = "No transactions recorded yet.";
pub const NO_EXPENSES: &str = "No expenses recorded yet.";

const CHART_WIDTH: usize = 30;
const CHART_BAR: char = '#';

pub fn transaction_rows(view: &SortedView<'_>, format: &DisplayFormat) -> Vec<String> {
    if view.is_empty() {
        return vec![NO_TRANSACTIONS.to_string()];
    }
    view.iter()
        .map(|txn| {
            // income rows leave the category column blank
            let category = if txn.is_expense() {
                txn.breakdown_category()
            } else {
                ""
            };
            format!(
                "{:>6}  {:<10}  {:<24}  {:<14}  {:>14}",
                txn.id.to_string(),
                format.format_date(txn.date),
                txn.text,
                category,
                format.format_signed(txn.amount)
            )
        })
        .collect()
}

pub fn totals_lines(aggregates: &Aggregates, format: &DisplayFormat) -> Vec<String> {
    vec![
        format!("Balance   : {}", format.format_amount(aggregates.balance)),
        format!("Income    : {}", format.format_amount(aggregates.income)),
        format!("Expenses  : {}", format.format_amount(aggregates.expense)),
    ]
}

pub fn breakdown_lines(aggregates: &Aggregates, format: &DisplayFormat) -> Vec<String> {
    if !aggregates.has_expenses() {
        return vec![NO_EXPENSES.to_string()];
    }
    aggregates
        .breakdown
        .iter()
        .map(|share| {
            format!(
                "{:<18} {:>14} {:>7}",
                share.category,
                format.format_amount(share.total),
                format.format_percentage(share.percentage)
            )
        })
        .collect()
}

/// Bar chart of total income, total expenses and net balance, scaled to the
/// largest magnitude.
pub fn chart_lines(aggregates: &Aggregates, format: &DisplayFormat) -> Vec<String> {
    let series = [
        ("Total Income", aggregates.income),
        ("Total Expenses", aggregates.expense),
        ("Net Balance", aggregates.net()),
    ];
    let max = series
        .iter()
        .map(|(_, value)| value.abs())
        .fold(0.0_f64, f64::max);
    series
        .iter()
        .map(|(label, value)| {
            let len = if max > 0.0 {
                ((value.abs() / max) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat(CHART_BAR).take(len).collect();
            format!(
                "{:<15} |{:<width$}| {}",
                label,
                bar,
                format.format_amount(*value),
                width = CHART_WIDTH
            )
        })
        .collect()
}

/// One-line recap printed after every change to the ledger.
pub fn status_line(aggregates: &Aggregates, format: &DisplayFormat) -> String {
    format!(
        "Balance {} | Income {} | Expenses {}",
        format.format_amount(aggregates.balance),
        format.format_amount(aggregates.income),
        format.format_amount(aggregates.expense)
    )
}
