pub mod json_backend;
pub mod memory;

use crate::{errors::LedgerError, ledger::Transaction};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends for the transaction list and the
/// last-used category.
pub trait StorageBackend {
    /// Returns the stored transactions in their stored order; empty when nothing
    /// has been saved yet.
    fn load(&self) -> Result<Vec<Transaction>>;
    /// Replaces the stored transactions with `transactions`.
    fn save(&self, transactions: &[Transaction]) -> Result<()>;
    fn load_last_category(&self) -> Result<Option<String>>;
    fn save_last_category(&self, category: &str) -> Result<()>;
}

/// Detects non-fatal anomalies within loaded transactions.
pub fn ledger_warnings(transactions: &[Transaction]) -> Vec<String> {
    let mut warnings = Vec::new();
    for txn in transactions {
        if txn.text.trim().is_empty() {
            warnings.push(format!("transaction {} has an empty description", txn.id));
        }
        if !txn.amount.is_finite() || txn.amount == 0.0 {
            warnings.push(format!(
                "transaction {} has unusable amount {}",
                txn.id, txn.amount
            ));
        }
    }
    warnings
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
