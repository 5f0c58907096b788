//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `roomsense.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ServerConfig: bind address for the HTTP hub.
//!     - DatabaseConfig: reading store URL (driver-specific).
//!     - PollerConfig: where the dashboard fetches from and how often.
//!     - LoggingConfig: tracing filter level.
//!
//! ==============================================================================

use serde::Deserialize;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// per-field defaults, so a section listing only some keys keeps the
// defaults for the rest instead of failing the whole parse

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerConfig {
    /// base URL of the hub the dashboard polls
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// fixed poll period. the original client's comment claimed 60s
    /// while the code used 10s; 10s is the documented value here.
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_database_url() -> String {
    "sqlite:roomsense.db?mode=rwc".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_interval_seconds() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;

        Ok(config)
    }

    /// Load with default fallback
    pub fn load_or_default() -> Self {
        let paths = [
            std::path::PathBuf::from("config").join("roomsense.toml"),
            std::path::PathBuf::from("roomsense.toml"),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        tracing::info!("config loaded from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::warn!("no config file found - using defaults");
        Self::default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            poller: PollerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            interval_seconds: default_interval_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.poller.interval_seconds, 10);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [poller]
            base_url = "http://hub.local:3000"
            interval_seconds = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.poller.base_url, "http://hub.local:3000");
        assert_eq!(config.poller.interval_seconds, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_section_keeps_defaults_for_its_other_keys() {
        let config: AppConfig = toml::from_str(
            r#"
            [poller]
            base_url = "http://hub.local:3000"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.poller.base_url, "http://hub.local:3000");
        assert_eq!(config.poller.interval_seconds, 10);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.bind, "0.0.0.0:3000");
    }
}
