//! Application configuration module
//!
//! Provides the runtime settings of the chat server. Values come from the
//! environment (after `.env` has been loaded by the binary) and fall back to
//! the defaults below.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | unset (in-memory store) |
//! | `SERVER_PORT` | `3000` |
//! | `SWEEP_INTERVAL_SECS` | `15` |
//! | `STALE_AFTER_SECS` | `10` |
//! | `STORE_TIMEOUT_MS` | `5000` |

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(10);
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// PostgreSQL connection string, memory store when `None`
    pub database_url: Option<String>,
    /// Port the HTTP server binds to
    pub server_port: u16,
    /// Time between two eviction sweeps
    pub sweep_interval: Duration,
    /// Silence after which a participant is evicted
    pub stale_after: Duration,
    /// Upper bound on any single store call
    pub store_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            server_port: DEFAULT_PORT,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            stale_after: DEFAULT_STALE_AFTER,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.server_port(parse_number("SERVER_PORT", &port)?);
        }
        if let Some(secs) = lookup("SWEEP_INTERVAL_SECS") {
            builder = builder.sweep_interval(Duration::from_secs(parse_number("SWEEP_INTERVAL_SECS", &secs)?));
        }
        if let Some(secs) = lookup("STALE_AFTER_SECS") {
            builder = builder.stale_after(Duration::from_secs(parse_number("STALE_AFTER_SECS", &secs)?));
        }
        if let Some(ms) = lookup("STORE_TIMEOUT_MS") {
            builder = builder.store_timeout(Duration::from_millis(parse_number("STORE_TIMEOUT_MS", &ms)?));
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("SWEEP_INTERVAL_SECS"));
        }
        if self.stale_after.is_zero() {
            return Err(ConfigError::ZeroDuration("STALE_AFTER_SECS"));
        }
        if self.store_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("STORE_TIMEOUT_MS"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    server_port: Option<u16>,
    sweep_interval: Option<Duration>,
    stale_after: Option<Duration>,
    store_timeout: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }

    pub fn stale_after(mut self, threshold: Duration) -> Self {
        self.stale_after = Some(threshold);
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            database_url: self.database_url,
            server_port: self.server_port.unwrap_or(defaults.server_port),
            sweep_interval: self.sweep_interval.unwrap_or(defaults.sweep_interval),
            stale_after: self.stale_after.unwrap_or(defaults.stale_after),
            store_timeout: self.store_timeout.unwrap_or(defaults.store_timeout),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}
