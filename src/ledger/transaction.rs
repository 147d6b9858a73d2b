use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::UNCATEGORIZED;

/// Integer identifier assigned to a transaction when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One income (positive amount) or expense (negative amount) record.
///
/// Transactions are never edited in place; correcting one means removing it and
/// adding a replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub text: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        text: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            amount,
            date,
            category: category.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Category label used when grouping expenses; blank labels fold into
    /// `Uncategorized`.
    pub fn breakdown_category(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            UNCATEGORIZED
        } else {
            trimmed
        }
    }
}
