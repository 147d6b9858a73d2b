//! Engine-side logic: services over the ledger, the persisting facade, and
//! display rules.

pub mod format;
pub mod ledger_manager;
pub mod services;
pub mod utils;

pub use ledger_manager::{LedgerEvent, LedgerManager};
