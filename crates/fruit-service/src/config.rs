//! Fruit store configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                        | Default                                |
//! |---------------------------------|----------------------------------------|
//! | `FRUIT_DB_PATH`                 | `<data dir>/fruit-store/inventory.db`  |
//! | `FRUIT_DB_MAX_CONNECTIONS`      | `5`                                    |
//! | `FRUIT_DB_CONNECT_TIMEOUT_SECS` | `30`                                   |
//! | `FRUIT_LOW_STOCK_THRESHOLD`     | `10`                                   |
//! | `FRUIT_LOG`                     | `info,fruit=debug,sqlx=warn`           |

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use fruit_core::DEFAULT_LOW_STOCK_THRESHOLD;
use fruit_db::DbConfig;

/// Default tracing filter when `FRUIT_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,fruit=debug,sqlx=warn";

/// Fruit store configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size upper bound
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub connect_timeout_secs: u64,

    /// `get_low_stock_default` threshold
    pub low_stock_threshold: i64,

    /// tracing-subscriber `EnvFilter` directive
    pub log_filter: String,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_path = match lookup("FRUIT_DB_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            Some(_) => return Err(ConfigError::InvalidValue("FRUIT_DB_PATH".to_string())),
            None => default_database_path()?,
        };

        let max_connections: u32 = lookup("FRUIT_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .trim()
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::InvalidValue("FRUIT_DB_MAX_CONNECTIONS".to_string()))?;

        let connect_timeout_secs: u64 = lookup("FRUIT_DB_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("FRUIT_DB_CONNECT_TIMEOUT_SECS".to_string()))?;

        let low_stock_threshold: i64 = lookup("FRUIT_LOW_STOCK_THRESHOLD")
            .unwrap_or_else(|| DEFAULT_LOW_STOCK_THRESHOLD.to_string())
            .trim()
            .parse()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| ConfigError::InvalidValue("FRUIT_LOW_STOCK_THRESHOLD".to_string()))?;

        let log_filter = lookup("FRUIT_LOG")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(StoreConfig {
            database_path,
            max_connections,
            connect_timeout_secs,
            low_stock_threshold,
            log_filter,
        })
    }

    /// Replaces the database path (e.g. from a `--db` flag).
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Builds the pool configuration for [`fruit_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

/// Platform data directory for the store.
///
/// ## Platform-Specific Paths
/// - **Linux**: `~/.local/share/fruit-store/inventory.db`
/// - **macOS**: `~/Library/Application Support/com.fruit-store.fruit-store/inventory.db`
/// - **Windows**: `%APPDATA%\fruit-store\fruit-store\data\inventory.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "fruit-store", "fruit-store")
        .ok_or_else(|| ConfigError::MissingRequired("FRUIT_DB_PATH".to_string()))?;

    Ok(dirs.data_dir().join("inventory.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<StoreConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("FRUIT_DB_PATH", "/tmp/fruit.db")]).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/fruit.db"));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("FRUIT_DB_PATH", "/tmp/fruit.db"),
            ("FRUIT_DB_MAX_CONNECTIONS", "2"),
            ("FRUIT_DB_CONNECT_TIMEOUT_SECS", " 7 "),
            ("FRUIT_LOW_STOCK_THRESHOLD", "25"),
            ("FRUIT_LOG", "warn"),
        ])
        .unwrap();

        assert_eq!(config.max_connections, 2);
        assert_eq!(config.connect_timeout_secs, 7);
        assert_eq!(config.low_stock_threshold, 25);
        assert_eq!(config.log_filter, "warn");

        let db = config.db_config();
        assert_eq!(db.max_connections, 2);
        assert_eq!(db.connect_timeout, Duration::from_secs(7));
        assert_eq!(db.database_path, PathBuf::from("/tmp/fruit.db"));
    }

    #[test]
    fn test_invalid_values() {
        for (var, value) in [
            ("FRUIT_DB_MAX_CONNECTIONS", "zero"),
            ("FRUIT_DB_MAX_CONNECTIONS", "0"),
            ("FRUIT_DB_CONNECT_TIMEOUT_SECS", "-1"),
            ("FRUIT_LOW_STOCK_THRESHOLD", "-5"),
            ("FRUIT_DB_PATH", "  "),
        ] {
            let err = load(&[("FRUIT_DB_PATH", "/tmp/fruit.db"), (var, value)]).unwrap_err();
            match err {
                ConfigError::InvalidValue(name) => assert_eq!(name, var),
                other => panic!("unexpected error for {var}={value}: {other}"),
            }
        }
    }

    #[test]
    fn test_default_path_ends_with_inventory_db() {
        // ProjectDirs needs a home directory; skip silently where there is none.
        if let Ok(config) = load(&[]) {
            assert!(config.database_path.ends_with("inventory.db"));
        }
    }

    #[test]
    fn test_with_database_path() {
        let config = load(&[("FRUIT_DB_PATH", "/tmp/a.db")])
            .unwrap()
            .with_database_path("/tmp/b.db");
        assert_eq!(config.database_path, PathBuf::from("/tmp/b.db"));
    }
}
