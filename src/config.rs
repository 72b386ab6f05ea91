//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Database location
//!
//! ```bash
//! export DATABASE_URL="sqlite://storage/storage.db?mode=rwc"
//! # or just the file path
//! export STORAGE_PATH="./storage/storage.db"
//! ```
//!
//! `DATABASE_URL` wins when both are set. With neither, the database lives at
//! `./storage/storage.db`.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8082`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `ALIAS_LENGTH` - Length of generated aliases (default: 6, range 4-32)
//! - `EVENT_POLL_INTERVAL_MS` - Outbox poll period (default: 5000, min: 10)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Seconds to wait for a pooled connection (default: 30)

use anyhow::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::persistence::PoolSettings;

const DEFAULT_STORAGE_PATH: &str = "./storage/storage.db";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Length of randomly generated aliases.
    pub alias_length: usize,
    /// Period of the outbox poller in milliseconds.
    pub event_poll_interval_ms: u64,
    /// Maximum number of connections in the pool.
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds.
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible so required variables can be added
    /// without changing callers.
    pub fn from_env() -> Result<Self> {
        let database_url = Self::load_database_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8082".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            alias_length: env_or("ALIAS_LENGTH", 6),
            event_poll_interval_ms: env_or("EVENT_POLL_INTERVAL_MS", 5000),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            db_connect_timeout: env_or("DB_CONNECT_TIMEOUT", 30),
        })
    }

    /// Loads the database URL.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. Constructed from `STORAGE_PATH`
    /// 3. `./storage/storage.db`
    fn load_database_url() -> String {
        if let Ok(url) = env::var("DATABASE_URL") {
            return url;
        }

        let path = env::var("STORAGE_PATH").unwrap_or_else(|_| DEFAULT_STORAGE_PATH.to_string());

        format!("sqlite://{}?mode=rwc", path)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` has no port
    /// - `database_url` is not a SQLite URL
    /// - `alias_length` is outside 4-32
    /// - `event_poll_interval_ms` is below 10
    /// - pool settings are zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if !(4..=32).contains(&self.alias_length) {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 4 and 32, got {}",
                self.alias_length
            );
        }

        if self.event_poll_interval_ms < 10 {
            anyhow::bail!(
                "EVENT_POLL_INTERVAL_MS must be at least 10, got {}",
                self.event_poll_interval_ms
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    pub fn event_poll_interval(&self) -> Duration {
        Duration::from_millis(self.event_poll_interval_ms)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_connect_timeout),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Alias length: {}", self.alias_length);
        tracing::info!("  Event poll interval: {}ms", self.event_poll_interval_ms);
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
