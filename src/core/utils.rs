use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".pocket_ledger";
const HOME_ENV: &str = "POCKET_LEDGER_HOME";
const TRANSACTIONS_FILE: &str = "transactions.json";
const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Resolves where the tracker keeps its files.
pub struct PathResolver;

impl PathResolver {
    /// `POCKET_LEDGER_HOME` when set, otherwise `~/.pocket_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn transactions_file_in(base: &Path) -> PathBuf {
        base.join(TRANSACTIONS_FILE)
    }

    /// Small scalar state such as the last used category.
    pub fn state_file_in(base: &Path) -> PathBuf {
        base.join(STATE_FILE)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Sibling path a file is staged at before it replaces `path`, e.g.
/// `transactions.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to the staging path, then renames it over `path`. A failed
/// write leaves the previous file in place.
pub fn replace_file(path: &Path, data: &str) -> io::Result<()> {
    let tmp = tmp_path(path);
    if let Some(parent) = tmp.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_wins_over_environment() {
        let custom = PathBuf::from("/tmp/pocket-ledger-test");
        assert_eq!(PathResolver::resolve_base(Some(custom.clone())), custom);
        assert_eq!(
            PathResolver::transactions_file_in(&custom),
            custom.join("transactions.json")
        );
    }

    #[test]
    fn replace_file_stages_next_to_target() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("config.json");
        assert_eq!(tmp_path(&target), temp.path().join("config.json.tmp"));

        replace_file(&target, "{}").unwrap();
        replace_file(&target, "{\"a\": 1}").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "{\"a\": 1}");
        assert!(!tmp_path(&target).exists());
    }

    #[test]
    fn failed_replace_keeps_previous_contents() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("state.json");
        replace_file(&target, "old").unwrap();
        fs::create_dir_all(tmp_path(&target)).unwrap();

        assert!(replace_file(&target, "new").is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");
    }
}
