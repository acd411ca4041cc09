mod init;
pub use init::{default_filter, init_logging, parse_rotation};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::rolling::Rotation;
/// Log filename used by the server.
pub const LOG_FILENAME: &str = "collectify.log";
/// Global log file path, set once at startup.
static LOG_FILE_PATH: OnceLock<String> = OnceLock::new();
/// Store the log file path for later retrieval (e.g., in error envelopes).
pub fn set_log_file_path(path: String) {
    if LOG_FILE_PATH.set(path).is_err() {
        tracing::debug!("log file path already set");
    }
}
/// Get the log file path set at startup.
pub fn get_log_file_path() -> &'static str {
    LOG_FILE_PATH.get().map_or("", String::as_str)
}
/// Default log directory: `~/.collectify/logs`.
#[must_use]
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".collectify")
        .join("logs")
}
/// Configuration for the logging system.
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// File name inside `log_dir`; the rolling appender adds a date suffix.
    pub file_name: String,
    pub log_level: Level,
    /// Extra `target=level` directives, e.g. `sqlx=debug`.
    pub directives: Vec<String>,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl LogConfig {
    /// Path of the active log file, for error messages.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.log_dir.join(&self.file_name)
    }
}
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            file_name: LOG_FILENAME.to_string(),
            log_level: Level::INFO,
            directives: Vec::new(),
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}
#[cfg(test)]
#[path = "../logging_tests.rs"]
mod logging_tests;
