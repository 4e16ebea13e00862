//! Startup configuration
//!
//! Read from the environment, after loading `.env` if one exists.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DB_PATH: &str = "bot_db.sqlite3";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Secret part of the webhook path
    pub token: String,
    pub db_path: PathBuf,
    pub port: u16,
    /// How long `SQLite` waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("CATALOG_BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("CATALOG_BOT_TOKEN"))?;

        let db_path = lookup("CATALOG_DB_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);

        let port = parse_or("CATALOG_PORT", lookup("CATALOG_PORT"), DEFAULT_PORT)?;
        let busy_timeout_ms = parse_or(
            "CATALOG_BUSY_TIMEOUT_MS",
            lookup("CATALOG_BUSY_TIMEOUT_MS"),
            DEFAULT_BUSY_TIMEOUT_MS,
        )?;

        Ok(Self {
            token,
            db_path,
            port,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
