use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::format::{DisplayFormat, DEFAULT_CURRENCY_SYMBOL, DEFAULT_DATE_FORMAT};
use crate::core::utils::{ensure_dir, replace_file, PathResolver};
use crate::errors::ConfigError;
use crate::ledger::SortOrder;

/// User preferences for the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub default_sort: SortOrder,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            date_format: Self::default_date_format(),
            default_sort: SortOrder::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        DEFAULT_CURRENCY_SYMBOL.into()
    }

    pub fn default_date_format() -> String {
        DEFAULT_DATE_FORMAT.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn display_format(&self) -> DisplayFormat {
        DisplayFormat::new(self.currency_symbol.clone(), self.date_format.clone())
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        replace_file(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
