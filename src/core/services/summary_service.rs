use std::collections::HashMap;

use serde::Serialize;

use crate::ledger::Ledger;

/// Totals derived from a ledger snapshot. Never stored, always recomputed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub balance: f64,
    pub income: f64,
    /// Absolute sum of expenses, reported as a non-negative number.
    pub expense: f64,
    /// Expense totals per category, largest first.
    pub breakdown: Vec<CategoryShare>,
}

impl Aggregates {
    pub fn has_expenses(&self) -> bool {
        !self.breakdown.is_empty()
    }

    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// One row of the per-category expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Share of total expense in percent (0-100).
    pub percentage: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn aggregates(ledger: &Ledger) -> Aggregates {
        let mut balance = 0.0;
        let mut income = 0.0;
        for txn in ledger.transactions() {
            balance += txn.amount;
            if txn.is_income() {
                income += txn.amount;
            }
        }

        let mut totals = Self::expense_totals(ledger);
        // stable: equal totals keep first-seen order
        totals.sort_by(|a, b| b.1.total_cmp(&a.1));
        // summed in display order
        let expense: f64 = totals.iter().map(|(_, total)| total).sum();
        let breakdown: Vec<CategoryShare> = totals
            .into_iter()
            .map(|(category, total)| CategoryShare {
                percentage: if expense > 0.0 {
                    total / expense * 100.0
                } else {
                    0.0
                },
                category,
                total,
            })
            .collect();

        Aggregates {
            balance,
            income,
            expense,
            breakdown,
        }
    }

    /// Sums absolute expense amounts per category in first-seen order.
    fn expense_totals(ledger: &Ledger) -> Vec<(String, f64)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<(String, f64)> = Vec::new();
        for txn in ledger.transactions().iter().filter(|txn| txn.is_expense()) {
            let category = txn.breakdown_category();
            match index.get(category) {
                Some(&slot) => totals[slot].1 += txn.amount.abs(),
                None => {
                    index.insert(category, totals.len());
                    totals.push((category.to_string(), txn.amount.abs()));
                }
            }
        }
        totals
    }
}
