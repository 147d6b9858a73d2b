use std::path::PathBuf;

use thiserror::Error;

/// Reasons a transaction draft is rejected before it touches the ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyText,
    #[error("amount is required")]
    MissingAmount,
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("amount must not be zero")]
    ZeroAmount,
    #[error("date is required")]
    MissingDate,
    #[error("invalid date `{0}` (use YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unreadable ledger data in {}: {reason}", path.display())]
    StorageRead { path: PathBuf, reason: String },
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("no transaction ids left to allocate")]
    IdsExhausted,
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

/// Errors raised while reading or writing user configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}
