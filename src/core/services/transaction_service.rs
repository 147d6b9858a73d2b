//! Business logic helpers for validating new transactions.

use chrono::NaiveDate;

use crate::errors::ValidationError;
use crate::ledger::resolve_category;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form input for a new transaction, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub text: String,
    pub amount: String,
    pub date: String,
    pub category: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        text: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            amount: amount.into(),
            date: date.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Draft fields after parsing, ready to receive an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    pub text: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
}

/// Provides validation for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Checks every field of `draft` and resolves its category.
    pub fn validate(draft: &TransactionDraft) -> Result<ValidatedTransaction, ValidationError> {
        let text = draft.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let amount = Self::parse_amount(&draft.amount)?;
        let date = Self::parse_date(&draft.date)?;
        let category = resolve_category(draft.category.as_deref(), amount);
        Ok(ValidatedTransaction {
            text: text.to_string(),
            amount,
            date,
            category,
        })
    }

    pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingAmount);
        }
        let value: f64 = raw
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
        if !value.is_finite() {
            return Err(ValidationError::InvalidAmount(raw.to_string()));
        }
        if value == 0.0 {
            return Err(ValidationError::ZeroAmount);
        }
        Ok(value)
    }

    pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
    }
}
