use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Environment variable consulted by [`Config::from_env`].
pub const DATABASE_URL_ENV: &str = "STOREFRONT_DATABASE_URL";

const DEFAULT_DATABASE_URL: &str = "storefront.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    /// Build a configuration from the process environment.
    ///
    /// Loads a `.env` file if one is present, then reads
    /// `STOREFRONT_DATABASE_URL`, falling back to the default local
    /// database path.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let url =
            std::env::var(DATABASE_URL_ENV).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        Self {
            database: DatabaseConfig {
                url,
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.into(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.url, "storefront.db");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn load_parses_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"reviews.db\"\nmax_connections = 10"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database.url, "reviews.db");
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn load_defaults_max_connections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nurl = \"reviews.db\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn load_rejects_empty_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nurl = \"\"").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn load_rejects_zero_connections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nurl = \"reviews.db\"\nmax_connections = 0").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = Config::load("/nonexistent/storefront.toml");
        assert!(result.is_err());
    }

    #[test]
    fn from_env_reads_database_url() {
        std::env::set_var(DATABASE_URL_ENV, "env.db");
        let config = Config::from_env();
        std::env::remove_var(DATABASE_URL_ENV);

        assert_eq!(config.database.url, "env.db");
    }
}
