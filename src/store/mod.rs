//! SQLite connection pool and schema bootstrap.

mod schema;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

pub use schema::SCHEMA;

/// Open a connection pool for `dsn`.
///
/// In-memory databases are pinned to a single long-lived connection so every
/// caller sees the same database.
pub async fn open_pool(dsn: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = dsn.contains(":memory:") || dsn.contains("mode=memory");
    let mut options = SqliteConnectOptions::from_str(dsn)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?
    };
    info!(dsn = %dsn, "database opened");
    Ok(pool)
}

/// Create every table and index that does not exist yet.
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!(statements = SCHEMA.len(), "schema applied");
    Ok(())
}

/// Open the pool and apply the schema in one step.
pub async fn connect(dsn: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = open_pool(dsn, max_connections).await?;
    apply_schema(&pool).await?;
    Ok(pool)
}
