//! Browsing and managing tombstoned rows across every kind.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::lifecycle;
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::model::{
    Category, Collection, EntityKind, Field, Item, ItemFieldValue, ListResponse, Tag,
};
use crate::repository::{self, Entity, Filter, OrderBy, Pagination, Scope};

/// One entry of a batch restore or delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeletedRef {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: EntityKind,
}

async fn tombstoned<T: Entity + Serialize>(
    conn: &mut SqliteConnection,
    page: &Pagination,
) -> Result<ListResponse<Value>, ServiceError> {
    let (rows, total) = repository::get_list::<T>(
        conn,
        Scope::Unscoped,
        &[Filter::is_not_null("deleted_at")],
        &[OrderBy::desc("deleted_at"), OrderBy::desc("id")],
        page,
    )
    .await?;
    let list = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ListResponse::new(list, total))
}

/// Tombstoned rows of one kind, most recently deleted first.
pub async fn list_deleted(
    ctx: &AppContext,
    kind: EntityKind,
    page: &Pagination,
) -> Result<ListResponse<Value>, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    match kind {
        EntityKind::Category => tombstoned::<Category>(&mut conn, page).await,
        EntityKind::Collection => tombstoned::<Collection>(&mut conn, page).await,
        EntityKind::Field => tombstoned::<Field>(&mut conn, page).await,
        EntityKind::Item => tombstoned::<Item>(&mut conn, page).await,
        EntityKind::Tag => tombstoned::<Tag>(&mut conn, page).await,
    }
}

fn require_refs(refs: &[DeletedRef]) -> Result<(), ServiceError> {
    if refs.is_empty() {
        return Err(ServiceError::invalid("list is required"));
    }
    if refs.iter().any(|r| r.id < 1) {
        return Err(ServiceError::invalid("id is required"));
    }
    Ok(())
}

/// Restore every entry with its cascade, all or nothing. Returns how many
/// entries were actually tombstoned.
pub async fn restore(ctx: &AppContext, refs: &[DeletedRef]) -> Result<usize, ServiceError> {
    require_refs(refs)?;
    let mut tx = ctx.pool.begin().await?;
    let mut restored = 0_usize;
    for r in refs {
        if lifecycle::restore_kind(&mut tx, r.kind, r.id).await? {
            restored = restored.saturating_add(1);
        }
    }
    tx.commit().await?;
    info!(requested = refs.len(), restored, "recycle bin restore");
    Ok(restored)
}

/// Remove every entry and its dependents for good, all or nothing.
pub async fn hard_delete(ctx: &AppContext, refs: &[DeletedRef]) -> Result<(), ServiceError> {
    require_refs(refs)?;
    let mut tx = ctx.pool.begin().await?;
    for r in refs {
        lifecycle::purge_kind(&mut tx, r.kind, r.id).await?;
    }
    tx.commit().await?;
    info!(purged = refs.len(), "recycle bin delete");
    Ok(())
}

async fn purge_tombstoned<T: Entity>(conn: &mut SqliteConnection) -> Result<u64, ServiceError> {
    repository::hard_delete::<T>(conn, &[Filter::is_not_null("deleted_at")]).await
}

/// Hard delete every tombstoned row of every kind, children first.
pub async fn clear_recycle_bin(pool: &SqlitePool) -> Result<u64, ServiceError> {
    let mut tx = pool.begin().await?;
    let counts = [
        purge_tombstoned::<ItemFieldValue>(&mut tx).await?,
        purge_tombstoned::<Item>(&mut tx).await?,
        purge_tombstoned::<Field>(&mut tx).await?,
        purge_tombstoned::<Category>(&mut tx).await?,
        purge_tombstoned::<Tag>(&mut tx).await?,
        purge_tombstoned::<Collection>(&mut tx).await?,
    ];
    tx.commit().await?;
    let total = counts.iter().fold(0_u64, |acc, n| acc.saturating_add(*n));
    info!(rows = total, "recycle bin cleared");
    Ok(total)
}

/// Clear the recycle bin through the shared context.
pub async fn clear(ctx: &AppContext) -> Result<u64, ServiceError> {
    clear_recycle_bin(&ctx.pool).await
}
