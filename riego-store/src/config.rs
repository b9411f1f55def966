use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::pool::{DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/riego";

/// Connection settings for the finca store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// On-disk layout of `config.toml`
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    database: Option<DatabaseSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    url: Option<String>,
    max_connections: Option<u32>,
    acquire_timeout_secs: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl StoreConfig {
    /// Load config: defaults, then the config file if present, then env.
    ///
    /// A missing file is fine; an unreadable or malformed one is an error.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        let path = Self::config_path();
        if path.exists() {
            config.merge_file(&path)?;
        }

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Get config file path: $RIEGO_CONFIG or ~/.riego/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("RIEGO_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".riego/config.toml")
    }

    /// Overlay values from a TOML file onto this config.
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;

        self.merge_toml(&content)
            .context(format!("Failed to parse config file (invalid TOML): {:?}", path))
    }

    fn merge_toml(&mut self, content: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(content)?;

        if let Some(db) = file.database {
            if let Some(url) = db.url {
                self.database_url = url;
            }
            if let Some(max) = db.max_connections {
                self.max_connections = max;
            }
            if let Some(secs) = db.acquire_timeout_secs {
                self.acquire_timeout_secs = secs;
            }
        }

        Ok(())
    }

    /// DATABASE_URL and RIEGO_MAX_CONNECTIONS win over the file.
    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(
            env::var("DATABASE_URL").ok(),
            env::var("RIEGO_MAX_CONNECTIONS").ok(),
        )
    }

    fn apply_overrides(
        &mut self,
        database_url: Option<String>,
        max_connections: Option<String>,
    ) -> Result<()> {
        if let Some(url) = database_url.filter(|u| !u.is_empty()) {
            self.database_url = url;
        }

        if let Some(raw) = max_connections {
            self.max_connections = raw
                .trim()
                .parse()
                .context(format!("RIEGO_MAX_CONNECTIONS is not a number: {:?}", raw))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.database_url, "postgres://localhost/riego");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_secs, 30);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"postgres://db.example/riego\"\nmax_connections = 12"
        )
        .unwrap();

        let mut config = StoreConfig::default();
        config.merge_file(file.path()).unwrap();

        assert_eq!(config.database_url, "postgres://db.example/riego");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.acquire_timeout_secs, 30);
    }

    #[test]
    fn file_without_database_table_keeps_defaults() {
        let mut config = StoreConfig::default();
        config.merge_toml("").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database\nurl = ").unwrap();

        let err = StoreConfig::default().merge_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn missing_file_is_an_error_when_merged_explicitly() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::default()
            .merge_file(&dir.path().join("absent.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn env_values_win() {
        let mut config = StoreConfig::default();
        config.merge_toml("[database]\nurl = \"postgres://file/riego\"").unwrap();
        config
            .apply_overrides(Some("postgres://env/riego".into()), Some(" 8 ".into()))
            .unwrap();

        assert_eq!(config.database_url, "postgres://env/riego");
        assert_eq!(config.max_connections, 8);
    }

    #[test]
    fn empty_database_url_is_ignored() {
        let mut config = StoreConfig::default();
        config.apply_overrides(Some(String::new()), None).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/riego");
    }

    #[test]
    fn bad_max_connections_is_an_error() {
        let mut config = StoreConfig::default();
        let err = config
            .apply_overrides(None, Some("many".into()))
            .unwrap_err();
        assert!(err.to_string().contains("RIEGO_MAX_CONNECTIONS"));
    }
}
