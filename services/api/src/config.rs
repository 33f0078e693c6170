//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// JSON catalog to serve; the built-in sample catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    pub cors_origin: String,
    /// Sessions idle for longer than this are expired.
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            catalog_path: None,
            cors_origin: "http://localhost:3000".to_string(),
            session_ttl: Duration::minutes(DEFAULT_SESSION_TTL_MINUTES),
        }
    }
}

const DEFAULT_SESSION_TTL_MINUTES: i64 = 24 * 60;
const MAX_SESSION_TTL_MINUTES: i64 = 365 * 24 * 60;

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        // --- Catalog and Session Settings ---
        let catalog_path = lookup("CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let session_ttl = match lookup("SESSION_TTL_MINUTES") {
            Some(raw) => {
                let minutes = raw
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|m| (1..=MAX_SESSION_TTL_MINUTES).contains(m))
                    .ok_or_else(|| {
                        ConfigError::InvalidValue(
                            "SESSION_TTL_MINUTES".to_string(),
                            format!(
                                "'{}' is not a number of minutes between 1 and {}",
                                raw, MAX_SESSION_TTL_MINUTES
                            ),
                        )
                    })?;
                Duration::minutes(minutes)
            }
            None => defaults.session_ttl,
        };

        Ok(Self {
            bind_address,
            log_level,
            catalog_path,
            cors_origin,
            session_ttl,
        })
    }
}
