//! Ledger domain models, persistence-friendly types, and helpers.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{resolve_category, DEFAULT_CATEGORIES, INCOME_CATEGORY, UNCATEGORIZED};
pub use ledger::{Ledger, SortOrder, SortedView};
pub use transaction::{Transaction, TransactionId};
