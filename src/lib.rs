#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger keeps a personal list of income and expense transactions,
//! derives balances and a per-category expense breakdown from it, and persists
//! everything as a plain JSON array.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}
