#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use once_cell::sync::Lazy;
use pocket_ledger::{
    config::ConfigManager, core::LedgerManager, storage::json_backend::JsonStorage,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh data home that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a manager over JSON storage in `base`.
pub fn open_manager(base: &Path) -> LedgerManager {
    let storage = JsonStorage::new(Some(base.to_path_buf())).expect("create json storage backend");
    LedgerManager::open(Box::new(storage)).expect("open ledger manager")
}

/// Creates isolated managers backed by unique directories for each test.
pub fn setup_test_env() -> (LedgerManager, ConfigManager, PathBuf) {
    let base = temp_home();
    let ledger_manager = open_manager(&base);
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (ledger_manager, config_manager, base)
}
