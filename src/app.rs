use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::Level;

use crate::config::ConfigOverrides;
use crate::logging::{default_log_dir, parse_rotation, LogConfig, LOG_FILENAME};

/// Collectify - personal collection server with user-defined typed fields
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML config file (default: ~/.collectify/config.toml)
    #[arg(short, long, env = "COLLECTIFY_CONFIG")]
    pub config: Option<PathBuf>,
    /// Address to bind the server to (overrides `server.addr`)
    #[arg(short, long, env = "COLLECTIFY_ADDR")]
    pub addr: Option<String>,
    /// SQLite DSN, e.g. sqlite://collectify.db (overrides `database.dsn`)
    #[arg(long, env = "COLLECTIFY_DATABASE_DSN")]
    pub database: Option<String>,
    /// Keep deleted records in the recycle bin (overrides `recycle_bin.enable`)
    #[arg(long, env = "COLLECTIFY_RECYCLE_BIN")]
    pub recycle_bin: Option<bool>,
    /// Comma-separated list of allowed CORS origins.
    /// Use "*" to allow all origins (not recommended for production).
    #[arg(long, env = "COLLECTIFY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,
    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "COLLECTIFY_LOG_JSON", default_value = "false")]
    pub log_json: bool,
    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "COLLECTIFY_LOG_ROTATION", default_value = "daily")]
    pub log_rotation: String,
    /// Custom log directory (default: ~/.collectify/logs)
    #[arg(long, env = "COLLECTIFY_LOG_DIR")]
    pub log_dir: Option<String>,
    /// Require a token on mutating routes (overrides `auth.enable`)
    #[arg(long, env = "COLLECTIFY_AUTH_ENABLE")]
    pub auth: Option<bool>,
    /// HS256 signing key for login tokens (overrides `auth.jwt_secret`)
    #[arg(long, env = "COLLECTIFY_AUTH_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,
    /// Log file name inside the log directory
    #[arg(long, env = "COLLECTIFY_LOG_FILE", default_value = LOG_FILENAME)]
    pub log_file: String,
    /// Level for collectify's own targets when RUST_LOG is unset
    #[arg(long, env = "COLLECTIFY_LOG_LEVEL", default_value = "info")]
    pub log_level: Level,
    /// Extra comma-separated filter directives, e.g. "sqlx=debug"
    #[arg(long, env = "COLLECTIFY_LOG_FILTER", value_delimiter = ',')]
    pub log_filter: Vec<String>,
}

impl Args {
    /// Settings that take precedence over the config file.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            addr: self.addr.clone(),
            dsn: self.database.clone(),
            recycle_bin: self.recycle_bin,
            cors_origins: self.cors_origins.clone(),
            auth: self.auth,
            jwt_secret: self.jwt_secret.clone(),
        }
    }

    /// Logging settings from the command line and environment.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_dir: self
                .log_dir
                .as_ref()
                .map_or_else(default_log_dir, PathBuf::from),
            file_name: self.log_file.clone(),
            log_level: self.log_level,
            directives: self.log_filter.clone(),
            json_format: self.log_json,
            rotation: parse_rotation(&self.log_rotation),
        }
    }
}

pub fn report_server_error(addr: SocketAddr, log_file: &Path, e: &std::io::Error) {
    if e.kind() == std::io::ErrorKind::AddrInUse {
        eprintln!();
        eprintln!("Error: Failed to start server - address {addr} is already in use");
        eprintln!();
        eprintln!("Another instance of collectify may already be running.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  1. Kill the existing process:   pkill collectify");
        eprintln!("  2. Use a different port:        collectify --addr 127.0.0.1:8081");
        eprintln!("  3. Check what's using the port: lsof -i :{}", addr.port());
        eprintln!();
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
    }
    eprintln!();
    eprintln!("Error: Failed to start server: {e}");
    eprintln!();
    eprintln!("Logs: {}", log_file.display());
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_overrides() {
        let args = Args::try_parse_from([
            "collectify",
            "--addr",
            "0.0.0.0:9000",
            "--recycle-bin",
            "true",
            "--cors-origins",
            "http://a.test, http://b.test",
        ])
        .unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.addr.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(overrides.recycle_bin, Some(true));
        assert_eq!(
            overrides.cors_origins,
            Some(vec!["http://a.test".to_string(), " http://b.test".to_string()])
        );
        assert!(overrides.dsn.is_none());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["collectify"]).unwrap();
        assert!(!args.log_json);
        assert_eq!(args.log_rotation, "daily");
        assert!(args.config.is_none());
        let log = args.log_config();
        assert_eq!(log.file_name, LOG_FILENAME);
        assert_eq!(log.log_level, Level::INFO);
        assert!(log.directives.is_empty());
    }

    #[test]
    fn test_log_args_shape_log_config() {
        let args = Args::try_parse_from([
            "collectify",
            "--log-dir",
            "/srv/logs",
            "--log-file",
            "api.log",
            "--log-level",
            "debug",
            "--log-filter",
            "sqlx=debug,tower=info",
        ])
        .unwrap();
        let log = args.log_config();
        assert_eq!(log.file_path(), PathBuf::from("/srv/logs/api.log"));
        assert_eq!(log.log_level, Level::DEBUG);
        assert_eq!(log.directives, vec!["sqlx=debug", "tower=info"]);
    }
}
