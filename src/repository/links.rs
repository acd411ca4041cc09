use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqliteConnection};

use super::{BindArgs, Entity, Filter, SqlArg};
use crate::error::ServiceError;

/// Many-to-many join tables between items and their groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTable {
    ItemTags,
    CollectionItems,
}

impl LinkTable {
    const fn table(self) -> &'static str {
        match self {
            Self::ItemTags => "item_tags",
            Self::CollectionItems => "collection_items",
        }
    }

    /// Column holding the id of the non-item side.
    const fn other_column(self) -> &'static str {
        match self {
            Self::ItemTags => "tag_id",
            Self::CollectionItems => "collection_id",
        }
    }
}

/// Link an item to a tag or collection. Returns `false` when the link
/// already existed.
pub async fn link(
    conn: &mut SqliteConnection,
    table: LinkTable,
    item_id: i64,
    other_id: i64,
) -> Result<bool, ServiceError> {
    let sql = format!(
        "INSERT OR IGNORE INTO {} (item_id, {}) VALUES (?, ?)",
        table.table(),
        table.other_column()
    );
    let result = sqlx::query::<Sqlite>(&sql)
        .bind(item_id)
        .bind(other_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove a link. Returns `false` when there was nothing to remove.
pub async fn unlink(
    conn: &mut SqliteConnection,
    table: LinkTable,
    item_id: i64,
    other_id: i64,
) -> Result<bool, ServiceError> {
    let sql = format!(
        "DELETE FROM {} WHERE item_id = ? AND {} = ?",
        table.table(),
        table.other_column()
    );
    let result = sqlx::query::<Sqlite>(&sql)
        .bind(item_id)
        .bind(other_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

struct Linked<T> {
    item_id: i64,
    entity: T,
}

impl<'r, T: FromRow<'r, SqliteRow>> FromRow<'r, SqliteRow> for Linked<T> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            item_id: row.try_get("link_item_id")?,
            entity: T::from_row(row)?,
        })
    }
}

/// Active entities linked to any of `item_ids`, paired with the item id.
pub async fn linked<T: Entity>(
    conn: &mut SqliteConnection,
    table: LinkTable,
    item_ids: &[i64],
) -> Result<Vec<(i64, T)>, ServiceError> {
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let link_table = table.table();
    let filter = Filter::in_list(&format!("{link_table}.item_id"), item_ids.iter().copied());
    let sql = format!(
        "SELECT {link_table}.item_id AS link_item_id, {t}.* FROM {link_table} \
         JOIN {t} ON {t}.id = {link_table}.{other} AND {t}.deleted_at IS NULL \
         WHERE {clause} ORDER BY {t}.id",
        t = T::TABLE,
        other = table.other_column(),
        clause = filter.clause,
    );
    let args: Vec<SqlArg> = filter.args;
    let rows = sqlx::query_as::<Sqlite, Linked<T>>(&sql)
        .bind_args(&args)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(|l| (l.item_id, l.entity)).collect())
}
