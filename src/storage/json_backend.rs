use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, replace_file, PathResolver},
    errors::LedgerError,
    ledger::Transaction,
};

use super::{Result, StorageBackend};

/// Directory-backed JSON persistence.
///
/// `transactions.json` holds the full transaction array and `state.json` the
/// last used category. Every write goes to a sibling `*.tmp` file first and is
/// then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    transactions_file: PathBuf,
    state_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        Ok(Self {
            transactions_file: PathResolver::transactions_file_in(&root),
            state_file: PathResolver::state_file_in(&root),
        })
    }

    pub fn transactions_path(&self) -> &Path {
        &self.transactions_file
    }

    fn read_state(&self) -> Result<StoreState> {
        if !self.state_file.exists() {
            return Ok(StoreState::default());
        }
        let data = fs::read_to_string(&self.state_file)?;
        match serde_json::from_str(&data) {
            Ok(state) => Ok(state),
            Err(err) => {
                tracing::warn!(
                    path = %self.state_file.display(),
                    error = %err,
                    "ignoring unreadable state file"
                );
                Ok(StoreState::default())
            }
        }
    }

    fn write_state(&self, state: &StoreState) -> Result<()> {
        let data = serde_json::to_string_pretty(state)?;
        Ok(replace_file(&self.state_file, &data)?)
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Vec<Transaction>> {
        load_transactions_from_path(&self.transactions_file)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        save_transactions_to_path(transactions, &self.transactions_file)?;
        tracing::debug!(
            count = transactions.len(),
            path = %self.transactions_file.display(),
            "saved transactions"
        );
        Ok(())
    }

    fn load_last_category(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.last_category)
    }

    fn save_last_category(&self, category: &str) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_category = Some(category.to_string());
        self.write_state(&state)
    }
}

/// Reads a transaction array, treating a missing file as an empty ledger.
pub fn load_transactions_from_path(path: &Path) -> Result<Vec<Transaction>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            return Err(storage_read(path, err.to_string()))
        }
        Err(err) => return Err(err.into()),
    };
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&data).map_err(|err| storage_read(path, err.to_string()))
}

pub fn save_transactions_to_path(transactions: &[Transaction], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(transactions)?;
    Ok(replace_file(path, &json)?)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    last_category: Option<String>,
}

fn storage_read(path: &Path, reason: String) -> LedgerError {
    LedgerError::StorageRead {
        path: path.to_path_buf(),
        reason,
    }
}
