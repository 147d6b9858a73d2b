use crate::ledger::{Ledger, DEFAULT_CATEGORIES, INCOME_CATEGORY};

/// Builds the advisory list of category suggestions.
pub struct CategoryService;

impl CategoryService {
    /// Default labels in fixed order followed by every other label used in the
    /// ledger, first-seen order, without duplicates.
    pub fn catalog(ledger: &Ledger) -> Vec<String> {
        let mut catalog: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        for txn in ledger.transactions() {
            let label = txn.category.trim();
            if label.is_empty() || label == INCOME_CATEGORY {
                continue;
            }
            if !catalog.iter().any(|existing| existing == label) {
                catalog.push(label.to_string());
            }
        }
        catalog
    }

    /// Case-insensitive membership check used for input hints only.
    pub fn is_known(ledger: &Ledger, candidate: &str) -> bool {
        let needle = candidate.trim().to_lowercase();
        Self::catalog(ledger)
            .iter()
            .any(|label| label.to_lowercase() == needle)
    }
}
