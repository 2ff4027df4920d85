//! Application configuration with layered loading.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. TOML config file (if MOONLOG_CONFIG_FILE set)
//! 3. Environment variables (MOONLOG_*)

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database holding the phase cache and journal.
    ///
    /// Set via MOONLOG_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Whether computed phases are written back to the cache.
    ///
    /// Set via MOONLOG_PERSIST_PHASES environment variable.
    #[serde(default = "default_true")]
    pub persist_phases: bool,

    /// Maximum characters in a journal text field.
    ///
    /// Set via MOONLOG_JOURNAL_MAX_LEN environment variable.
    #[serde(default = "default_journal_max_len")]
    pub journal_max_len: usize,

    /// Number of entries `journal_list` returns when no limit is given.
    ///
    /// Set via MOONLOG_JOURNAL_LIST_LIMIT environment variable.
    #[serde(default = "default_journal_list_limit")]
    pub journal_list_limit: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./moonlog.sqlite")
}

fn default_true() -> bool {
    true
}

fn default_journal_max_len() -> usize {
    2_000
}

fn default_journal_list_limit() -> usize {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            persist_phases: true,
            journal_max_len: default_journal_max_len(),
            journal_list_limit: default_journal_list_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources and validate it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be read or
    /// parsed, or if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered figment `load` extracts from.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MOONLOG_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("MOONLOG_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./moonlog.sqlite"));
        assert!(config.persist_phases);
        assert_eq!(config.journal_max_len, 2_000);
        assert_eq!(config.journal_list_limit, 50);
    }

    #[test]
    fn test_env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("MOONLOG_DB_PATH", "/tmp/moon.sqlite");
            jail.set_env("MOONLOG_PERSIST_PHASES", "false");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.db_path, PathBuf::from("/tmp/moon.sqlite"));
            assert!(!config.persist_phases);
            assert_eq!(config.journal_max_len, 2_000);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file("moonlog.toml", "journal_max_len = 500\njournal_list_limit = 10\n")?;
            jail.set_env("MOONLOG_CONFIG_FILE", "moonlog.toml");
            jail.set_env("MOONLOG_JOURNAL_LIST_LIMIT", "20");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.journal_max_len, 500);
            assert_eq!(config.journal_list_limit, 20);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("MOONLOG_JOURNAL_MAX_LEN", "0");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "journal_max_len"));
            Ok(())
        });
    }
}
