//! Server configuration loaded from an optional TOML file.
//!
//! Every section falls back to its `Default` when absent, and CLI / env
//! values are layered on top with [`AppConfig::apply_overrides`].

mod loader;
pub use loader::{load_config, load_config_from};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

pub const DEFAULT_DSN: &str = "sqlite://collectify.db";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

fn default_dsn() -> String {
    DEFAULT_DSN.to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_expire_days() -> i64 {
    15
}

fn default_addr() -> String {
    DEFAULT_ADDR.to_string()
}

fn default_cors_origins() -> Vec<String> {
    crate::cors::DEFAULT_CORS_ORIGINS
        .split(',')
        .map(str::to_string)
        .collect()
}

/// `[database]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    #[serde(default = "default_dsn")]
    pub dsn: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: default_dsn(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[server]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// `[recycle_bin]` table. When disabled, deletes are hard and any leftover
/// tombstones are purged at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RecycleBinConfig {
    #[serde(default)]
    pub enable: bool,
}

/// `[auth]` table. While disabled every route is open and login is a no-op.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(default)]
    pub enable: bool,
    /// HS256 signing key.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime; `0` issues tokens that never expire.
    #[serde(default = "default_expire_days")]
    pub expire_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enable: false,
            jwt_secret: String::new(),
            expire_days: default_expire_days(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enable", &self.enable)
            .field("jwt_secret", &"<redacted>")
            .field("expire_days", &self.expire_days)
            .finish()
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub recycle_bin: RecycleBinConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Values supplied on the command line or through `COLLECTIFY_*` env vars.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub addr: Option<String>,
    pub dsn: Option<String>,
    pub recycle_bin: Option<bool>,
    pub cors_origins: Option<Vec<String>>,
    pub auth: Option<bool>,
    pub jwt_secret: Option<String>,
}

impl AppConfig {
    /// Layer CLI / env overrides on top of the file values.
    #[must_use]
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(addr) = overrides.addr {
            self.server.addr = addr;
        }
        if let Some(dsn) = overrides.dsn {
            self.database.dsn = dsn;
        }
        if let Some(enable) = overrides.recycle_bin {
            self.recycle_bin.enable = enable;
        }
        if let Some(origins) = overrides.cors_origins {
            self.server.cors_origins = origins
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(enable) = overrides.auth {
            self.auth.enable = enable;
        }
        if let Some(secret) = overrides.jwt_secret {
            self.auth.jwt_secret = secret;
        }
        self
    }

    /// Reject combinations the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.enable && self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "auth.jwt_secret is required when auth is enabled",
            ));
        }
        if self.auth.expire_days < 0 {
            return Err(ConfigError::Invalid("auth.expire_days must not be negative"));
        }
        Ok(())
    }
}

/// Resolve the default path for the config file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".collectify").join("config.toml"))
}

#[cfg(test)]
#[path = "../config_tests.rs"]
mod config_tests;
