//! Cascading delete and restore for every entity kind.
//!
//! The cascade shape per kind:
//!
//! | kind       | delete                              | restore                                         |
//! |------------|-------------------------------------|-------------------------------------------------|
//! | category   | values of its fields, fields, items | fields, items, values of its fields             |
//! | field      | its values                          | its category (alone), its values                |
//! | item       | its values                          | its category with all fields, its values        |
//! | tag        | row only                            | row only                                        |
//! | collection | row only                            | row only                                        |
//!
//! Join rows (`item_tags`, `collection_items`) stay in place on soft delete and
//! are dropped by foreign key cascade on hard delete.

use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::error::ServiceError;
use crate::model::{Category, Collection, EntityKind, Field, Item, ItemFieldValue, Tag};
use crate::repository::{self, DeleteMode, Entity, Filter, Scope};

/// Entities that can be removed together with whatever depends on them.
#[async_trait]
pub trait SoftDeletable: Entity {
    /// Delete the row `id` and its dependents. The caller has already checked
    /// that the row exists.
    async fn delete_cascade(
        conn: &mut SqliteConnection,
        id: i64,
        mode: DeleteMode,
    ) -> Result<(), ServiceError>;
}

/// Entities whose tombstone can be cleared.
#[async_trait]
pub trait Restorable: SoftDeletable {
    /// Clear the tombstone of `id` and of the dependents removed with it.
    async fn restore_cascade(conn: &mut SqliteConnection, id: i64) -> Result<(), ServiceError>;
}

fn scope_for(mode: DeleteMode) -> Scope {
    match mode {
        DeleteMode::Soft => Scope::Active,
        DeleteMode::Hard => Scope::Unscoped,
    }
}

#[async_trait]
impl SoftDeletable for Category {
    async fn delete_cascade(
        conn: &mut SqliteConnection,
        id: i64,
        mode: DeleteMode,
    ) -> Result<(), ServiceError> {
        let field_ids =
            repository::pluck_ids::<Field>(conn, scope_for(mode), &[Filter::eq("category_id", id)])
                .await?;
        let values = repository::delete::<ItemFieldValue>(
            conn,
            &[Filter::in_list("field_id", field_ids.iter().copied())],
            mode,
        )
        .await?;
        let fields =
            repository::delete::<Field>(conn, &[Filter::eq("category_id", id)], mode).await?;
        let items =
            repository::delete::<Item>(conn, &[Filter::eq("category_id", id)], mode).await?;
        repository::delete::<Category>(conn, &[Filter::eq("id", id)], mode).await?;
        debug!(category_id = id, fields, items, values, "category cascade");
        Ok(())
    }
}

#[async_trait]
impl Restorable for Category {
    async fn restore_cascade(conn: &mut SqliteConnection, id: i64) -> Result<(), ServiceError> {
        let field_ids =
            repository::pluck_ids::<Field>(conn, Scope::Unscoped, &[Filter::eq("category_id", id)])
                .await?;
        repository::restore::<Category>(conn, &[Filter::eq("id", id)]).await?;
        let fields = repository::restore::<Field>(conn, &[Filter::eq("category_id", id)]).await?;
        let items = repository::restore::<Item>(conn, &[Filter::eq("category_id", id)]).await?;
        let values = repository::restore::<ItemFieldValue>(
            conn,
            &[Filter::in_list("field_id", field_ids)],
        )
        .await?;
        debug!(category_id = id, fields, items, values, "category restored");
        Ok(())
    }
}

#[async_trait]
impl SoftDeletable for Field {
    async fn delete_cascade(
        conn: &mut SqliteConnection,
        id: i64,
        mode: DeleteMode,
    ) -> Result<(), ServiceError> {
        let values =
            repository::delete::<ItemFieldValue>(conn, &[Filter::eq("field_id", id)], mode)
                .await?;
        repository::delete::<Field>(conn, &[Filter::eq("id", id)], mode).await?;
        debug!(field_id = id, values, "field cascade");
        Ok(())
    }
}

#[async_trait]
impl Restorable for Field {
    async fn restore_cascade(conn: &mut SqliteConnection, id: i64) -> Result<(), ServiceError> {
        let field = repository::get_unscoped::<Field>(conn, id).await?;
        try_restore_category(conn, field.category_id).await?;
        repository::restore::<Field>(conn, &[Filter::eq("id", id)]).await?;
        let values =
            repository::restore::<ItemFieldValue>(conn, &[Filter::eq("field_id", id)]).await?;
        debug!(field_id = id, values, "field restored");
        Ok(())
    }
}

#[async_trait]
impl SoftDeletable for Item {
    async fn delete_cascade(
        conn: &mut SqliteConnection,
        id: i64,
        mode: DeleteMode,
    ) -> Result<(), ServiceError> {
        let values =
            repository::delete::<ItemFieldValue>(conn, &[Filter::eq("item_id", id)], mode).await?;
        repository::delete::<Item>(conn, &[Filter::eq("id", id)], mode).await?;
        debug!(item_id = id, values, "item cascade");
        Ok(())
    }
}

#[async_trait]
impl Restorable for Item {
    async fn restore_cascade(conn: &mut SqliteConnection, id: i64) -> Result<(), ServiceError> {
        let item = repository::get_unscoped::<Item>(conn, id).await?;
        try_restore_category_with_fields(conn, item.category_id).await?;
        repository::restore::<Item>(conn, &[Filter::eq("id", id)]).await?;
        let values =
            repository::restore::<ItemFieldValue>(conn, &[Filter::eq("item_id", id)]).await?;
        debug!(item_id = id, values, "item restored");
        Ok(())
    }
}

macro_rules! leaf_lifecycle {
    ($($ty:ty),+) => {$(
        #[async_trait]
        impl SoftDeletable for $ty {
            async fn delete_cascade(
                conn: &mut SqliteConnection,
                id: i64,
                mode: DeleteMode,
            ) -> Result<(), ServiceError> {
                repository::delete::<$ty>(conn, &[Filter::eq("id", id)], mode).await?;
                Ok(())
            }
        }

        #[async_trait]
        impl Restorable for $ty {
            async fn restore_cascade(
                conn: &mut SqliteConnection,
                id: i64,
            ) -> Result<(), ServiceError> {
                repository::restore::<$ty>(conn, &[Filter::eq("id", id)]).await?;
                Ok(())
            }
        }
    )+};
}

leaf_lifecycle!(Tag, Collection);

/// Restore a tombstoned category on its own. Its fields stay as they are.
pub async fn try_restore_category(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> Result<(), ServiceError> {
    if repository::is_deleted::<Category>(conn, category_id).await? {
        repository::restore::<Category>(conn, &[Filter::eq("id", category_id)]).await?;
        debug!(category_id, "parent category restored");
    }
    Ok(())
}

/// Restore a tombstoned category together with every one of its fields.
pub async fn try_restore_category_with_fields(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> Result<(), ServiceError> {
    if repository::is_deleted::<Category>(conn, category_id).await? {
        repository::restore::<Category>(conn, &[Filter::eq("id", category_id)]).await?;
        let fields =
            repository::restore::<Field>(conn, &[Filter::eq("category_id", category_id)]).await?;
        debug!(category_id, fields, "parent category restored with fields");
    }
    Ok(())
}

/// Delete an active row and its dependents on an open connection.
pub async fn delete_in<T: SoftDeletable>(
    conn: &mut SqliteConnection,
    id: i64,
    mode: DeleteMode,
) -> Result<(), ServiceError> {
    repository::get::<T>(conn, id).await?;
    T::delete_cascade(conn, id, mode).await
}

/// Restore a row on an open connection. Active rows are left untouched and
/// `false` is returned.
pub async fn restore_in<T: Restorable>(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, ServiceError> {
    if !repository::is_deleted::<T>(conn, id).await? {
        return Ok(false);
    }
    T::restore_cascade(conn, id).await?;
    Ok(true)
}

/// Remove a row for good, tombstoned or not.
pub async fn purge_in<T: SoftDeletable>(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<(), ServiceError> {
    repository::get_unscoped::<T>(conn, id).await?;
    T::delete_cascade(conn, id, DeleteMode::Hard).await
}

/// Delete `id` in its own transaction, honoring the recycle bin setting.
pub async fn delete<T: SoftDeletable>(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    let mode = ctx.delete_mode();
    let mut tx = ctx.pool.begin().await?;
    delete_in::<T>(&mut tx, id, mode).await?;
    tx.commit().await?;
    info!(entity = T::NAME, id, ?mode, "deleted");
    Ok(())
}

/// Restore `id` in its own transaction.
pub async fn restore<T: Restorable>(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    let mut tx = ctx.pool.begin().await?;
    let restored = restore_in::<T>(&mut tx, id).await?;
    tx.commit().await?;
    if restored {
        info!(entity = T::NAME, id, "restored");
    } else {
        debug!(entity = T::NAME, id, "restore skipped, already active");
    }
    Ok(())
}

/// Restore by runtime kind.
pub async fn restore_kind(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
) -> Result<bool, ServiceError> {
    match kind {
        EntityKind::Category => restore_in::<Category>(conn, id).await,
        EntityKind::Collection => restore_in::<Collection>(conn, id).await,
        EntityKind::Field => restore_in::<Field>(conn, id).await,
        EntityKind::Item => restore_in::<Item>(conn, id).await,
        EntityKind::Tag => restore_in::<Tag>(conn, id).await,
    }
}

/// Hard delete by runtime kind.
pub async fn purge_kind(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
) -> Result<(), ServiceError> {
    match kind {
        EntityKind::Category => purge_in::<Category>(conn, id).await,
        EntityKind::Collection => purge_in::<Collection>(conn, id).await,
        EntityKind::Field => purge_in::<Field>(conn, id).await,
        EntityKind::Item => purge_in::<Item>(conn, id).await,
        EntityKind::Tag => purge_in::<Tag>(conn, id).await,
    }
}
