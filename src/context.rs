use sqlx::SqlitePool;

use crate::config::AuthConfig;
use crate::repository::DeleteMode;

/// Shared handles built once at startup and passed to every service call.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub pool: SqlitePool,
    pub recycle_bin: bool,
    pub auth: AuthConfig,
}

impl AppContext {
    /// Context with authentication disabled.
    #[must_use]
    pub fn new(pool: SqlitePool, recycle_bin: bool) -> Self {
        Self {
            pool,
            recycle_bin,
            auth: AuthConfig::default(),
        }
    }

    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Soft deletes while the recycle bin is enabled, hard deletes otherwise.
    #[must_use]
    pub fn delete_mode(&self) -> DeleteMode {
        DeleteMode::for_recycle_bin(self.recycle_bin)
    }
}
