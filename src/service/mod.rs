//! Business operations. Every mutation runs in a single transaction; reads
//! borrow one pooled connection.

pub mod category;
pub mod collection;
pub mod field;
pub mod item;
pub mod lifecycle;
pub mod recycle_bin;
pub mod tag;
pub mod user;

use sqlx::SqliteConnection;

use crate::error::ServiceError;
use crate::repository::{self, Entity, Filter};

/// Trimmed, non-empty name.
pub(crate) fn require_name(name: &str) -> Result<String, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::invalid("name is required"));
    }
    Ok(name.to_string())
}

/// Reject ids the database never hands out.
pub(crate) fn require_id(id: i64, what: &str) -> Result<(), ServiceError> {
    if id < 1 {
        return Err(ServiceError::invalid(format!("{what} is required")));
    }
    Ok(())
}

/// Fail with `Duplicated` when a row matching `filters` exists, tombstoned
/// rows included. `exclude` skips the row being renamed.
pub(crate) async fn ensure_unique<T: Entity>(
    conn: &mut SqliteConnection,
    mut filters: Vec<Filter>,
    exclude: Option<i64>,
) -> Result<(), ServiceError> {
    if let Some(id) = exclude {
        filters.push(Filter::ne("id", id));
    }
    match repository::duplicate_check::<T>(conn, &filters).await? {
        Some((id, is_deleted)) => Err(ServiceError::Duplicated {
            entity: T::NAME,
            id,
            is_deleted,
        }),
        None => Ok(()),
    }
}
