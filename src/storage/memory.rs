use std::{cell::RefCell, rc::Rc};

use crate::{errors::LedgerError, ledger::Transaction};

use super::{Result, StorageBackend};

#[derive(Debug, Default)]
struct MemoryState {
    transactions: Vec<Transaction>,
    last_category: Option<String>,
    saves: usize,
    fail_saves: bool,
}

/// In-process backend. Clones share the same state, so a caller can keep one
/// handle for inspection after giving another to a `LedgerManager`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.state.borrow().saves
    }

    pub fn stored(&self) -> Vec<Transaction> {
        self.state.borrow().transactions.clone()
    }

    /// Makes every following `save` fail until reset.
    pub fn set_fail_saves(&self, fail: bool) {
        self.state.borrow_mut().fail_saves = fail;
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Vec<Transaction>> {
        Ok(self.state.borrow().transactions.clone())
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_saves {
            return Err(LedgerError::Persistence("memory storage is read-only".into()));
        }
        state.transactions = transactions.to_vec();
        state.saves += 1;
        Ok(())
    }

    fn load_last_category(&self) -> Result<Option<String>> {
        Ok(self.state.borrow().last_category.clone())
    }

    fn save_last_category(&self, category: &str) -> Result<()> {
        self.state.borrow_mut().last_category = Some(category.to_string());
        Ok(())
    }
}
