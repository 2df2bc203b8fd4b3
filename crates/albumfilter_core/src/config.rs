//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level.
//!
//! # Invariants
//! - Blank variables behave exactly like unset ones.
//! - The log level is validated at load time, not at logger start.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Overrides the album database path.
pub const ENV_DB_PATH: &str = "ALBUMFILTER_DB_PATH";
/// Overrides the rolling log directory.
pub const ENV_LOG_DIR: &str = "ALBUMFILTER_LOG_DIR";
/// Overrides the log level (`trace|debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "ALBUMFILTER_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "albumfilter.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "albumfilter-logs";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_dir = non_blank(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        let log_level = match non_blank(ENV_LOG_LEVEL) {
            Some(raw) => normalize_level(&raw).map_err(|_| ConfigError::InvalidLogLevel(raw))?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

/// Configuration load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => write!(
                f,
                "{ENV_LOG_LEVEL}=`{value}` is not one of trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("albumfilter.sqlite3")
        );
        assert_eq!(config.log_dir, std::env::temp_dir().join("albumfilter-logs"));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn explicit_values_are_trimmed_and_used() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, " /data/library.sqlite3 "),
            (ENV_LOG_DIR, "/var/log/albumfilter"),
            (ENV_LOG_LEVEL, "WARNING"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/library.sqlite3"));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/albumfilter"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "   ")])).unwrap();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("albumfilter.sqlite3")
        );
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "verbose")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("verbose".to_string()));
    }
}
