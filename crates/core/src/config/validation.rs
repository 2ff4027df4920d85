//! Configuration validation rules.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

const MAX_JOURNAL_LEN: usize = 10_000;
const MAX_LIST_LIMIT: usize = 1_000;

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `db_path` is empty
    /// - `journal_max_len` is 0 or above 10 000
    /// - `journal_list_limit` is 0 or above 1 000
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "db_path".into(), reason: "must not be empty".into() });
        }

        if !(1..=MAX_JOURNAL_LEN).contains(&self.journal_max_len) {
            return Err(ConfigError::Invalid {
                field: "journal_max_len".into(),
                reason: format!("must be between 1 and {MAX_JOURNAL_LEN}"),
            });
        }

        if !(1..=MAX_LIST_LIMIT).contains(&self.journal_list_limit) {
            return Err(ConfigError::Invalid {
                field: "journal_list_limit".into(),
                reason: format!("must be between 1 and {MAX_LIST_LIMIT}"),
            });
        }

        if !self.persist_phases {
            tracing::warn!("persist_phases is off; every phase lookup will recompute");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_db_path() {
        let config = AppConfig { db_path: PathBuf::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "db_path"));
    }

    #[test]
    fn test_validate_journal_max_len_bounds() {
        let config = AppConfig { journal_max_len: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "journal_max_len"));

        let config = AppConfig { journal_max_len: 10_001, ..Default::default() };
        assert!(config.validate().is_err());

        let config = AppConfig { journal_max_len: 10_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_list_limit_bounds() {
        let config = AppConfig { journal_list_limit: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "journal_list_limit"));

        let config = AppConfig { journal_list_limit: 1, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
