//! Items: scalar attributes, typed field values, tags and collections.

mod detail;
mod search;

pub use search::{search, SearchRequest};

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqliteConnection;
use tracing::{debug, info};

use self::detail::load_details;
use super::{lifecycle, require_id};
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::field_value::store_values;
use crate::model::{
    Category, Collection, Field, Item, ItemDetail, ItemFieldValue, ItemStatus, ListResponse, Tag,
};
use crate::repository::{
    self, Assignment, Entity, Filter, LinkTable, OrderBy, Pagination, Scope, SqlArg,
};

/// Most recently touched first.
pub(crate) const ITEM_ORDER: [OrderBy; 2] = [OrderBy::desc("updated_at"), OrderBy::desc("id")];

const MAX_RATING: f64 = 10.0;

/// One field value in a create or update request.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldValueInput {
    pub field_id: i64,
    #[serde(default)]
    pub value: Value,
}

/// Scalar attributes and field values of an item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemInput {
    pub title: String,
    pub status: ItemStatus,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub values: Vec<FieldValueInput>,
}

fn check_url(name: &str, url: &str) -> Result<(), ServiceError> {
    if url.is_empty() {
        return Ok(());
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(()),
        _ => Err(ServiceError::invalid(format!(
            "{name} must be an absolute http(s) url"
        ))),
    }
}

impl ItemInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::invalid("title is required"));
        }
        if let Some(rating) = self.rating {
            if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                return Err(ServiceError::invalid("rating must be between 0 and 10"));
            }
        }
        if self.priority < 0 {
            return Err(ServiceError::invalid("priority must not be negative"));
        }
        check_url("cover_url", self.cover_url.trim())?;
        check_url("source_url", self.source_url.trim())?;

        let mut seen = HashSet::with_capacity(self.values.len());
        for value in &self.values {
            require_id(value.field_id, "field_id")?;
            if !seen.insert(value.field_id) {
                return Err(ServiceError::invalid(format!(
                    "duplicate value for field {}",
                    value.field_id
                )));
            }
        }
        Ok(())
    }

    fn assignments(&self) -> Vec<Assignment> {
        vec![
            ("title", self.title.trim().into()),
            ("status", self.status.code().into()),
            ("rating", self.rating.into()),
            ("description", self.description.clone().into()),
            ("notes", self.notes.clone().into()),
            ("cover_url", self.cover_url.trim().into()),
            ("source_url", self.source_url.trim().into()),
            ("priority", self.priority.into()),
        ]
    }
}

/// New value for `completed_at`, or `None` to leave it untouched.
fn completed_at_transition(old: Option<ItemStatus>, new: ItemStatus) -> Option<SqlArg> {
    let was_completed = old == Some(ItemStatus::Completed);
    let is_completed = new == ItemStatus::Completed;
    match (was_completed, is_completed) {
        (false, true) => Some(SqlArg::Time(Utc::now())),
        (true, false) => Some(SqlArg::Null),
        _ => None,
    }
}

async fn active_fields(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> Result<HashMap<i64, Field>, ServiceError> {
    let (fields, _) = repository::get_list::<Field>(
        conn,
        Scope::Active,
        &[Filter::eq("category_id", category_id)],
        &[OrderBy::asc("id")],
        &Pagination::unpaged(),
    )
    .await?;
    Ok(fields.into_iter().map(|f| (f.id, f)).collect())
}

async fn write_values(
    conn: &mut SqliteConnection,
    item_id: i64,
    fields: &HashMap<i64, Field>,
    values: &[FieldValueInput],
) -> Result<usize, ServiceError> {
    let mut rows = 0_usize;
    for input in values {
        let field = fields
            .get(&input.field_id)
            .ok_or(ServiceError::FieldNotFound(input.field_id))?;
        rows = rows.saturating_add(store_values(conn, item_id, field, &input.value).await?);
    }
    Ok(rows)
}

async fn detail_of(conn: &mut SqliteConnection, item: Item) -> Result<ItemDetail, ServiceError> {
    load_details(conn, vec![item])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found(Item::NAME))
}

pub async fn create(
    ctx: &AppContext,
    category_id: i64,
    input: &ItemInput,
) -> Result<ItemDetail, ServiceError> {
    require_id(category_id, "category_id")?;
    input.validate()?;
    let mut tx = ctx.pool.begin().await?;
    repository::get::<Category>(&mut tx, category_id).await?;
    let fields = active_fields(&mut tx, category_id).await?;

    let mut columns = input.assignments();
    columns.push(("category_id", category_id.into()));
    if let Some(completed_at) = completed_at_transition(None, input.status) {
        columns.push(("completed_at", completed_at));
    }
    let item = repository::create::<Item>(&mut tx, &columns).await?;
    let rows = write_values(&mut tx, item.id, &fields, &input.values).await?;
    let detail = detail_of(&mut tx, item).await?;
    tx.commit().await?;
    info!(item_id = detail.item.id, category_id, values = rows, "item created");
    Ok(detail)
}

pub async fn get(ctx: &AppContext, id: i64) -> Result<ItemDetail, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    let item = repository::get::<Item>(&mut conn, id).await?;
    detail_of(&mut conn, item).await
}

pub async fn list(
    ctx: &AppContext,
    page: &Pagination,
) -> Result<ListResponse<ItemDetail>, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    let (items, total) =
        repository::get_list::<Item>(&mut conn, Scope::Active, &[], &ITEM_ORDER, page).await?;
    let details = load_details(&mut conn, items).await?;
    Ok(ListResponse::new(details, total))
}

/// Replace the scalar attributes and rebuild every field value.
pub async fn update(
    ctx: &AppContext,
    id: i64,
    input: &ItemInput,
) -> Result<ItemDetail, ServiceError> {
    input.validate()?;
    let mut tx = ctx.pool.begin().await?;
    let old = repository::get::<Item>(&mut tx, id).await?;
    let fields = active_fields(&mut tx, old.category_id).await?;

    let mut columns = input.assignments();
    if let Some(completed_at) = completed_at_transition(Some(old.status), input.status) {
        columns.push(("completed_at", completed_at));
    }
    repository::update::<Item>(&mut tx, &[Filter::eq("id", id)], &columns).await?;
    let dropped =
        repository::hard_delete::<ItemFieldValue>(&mut tx, &[Filter::eq("item_id", id)]).await?;
    let rows = write_values(&mut tx, id, &fields, &input.values).await?;
    let item = repository::get::<Item>(&mut tx, id).await?;
    let detail = detail_of(&mut tx, item).await?;
    tx.commit().await?;
    info!(item_id = id, dropped, values = rows, "item updated");
    Ok(detail)
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::delete::<Item>(ctx, id).await
}

/// Restores the item and its values. A tombstoned category comes back with
/// all of its fields.
pub async fn restore(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::restore::<Item>(ctx, id).await
}

async fn set_link<T: Entity>(
    ctx: &AppContext,
    table: LinkTable,
    item_id: i64,
    other_id: i64,
    attach: bool,
) -> Result<(), ServiceError> {
    let mut tx = ctx.pool.begin().await?;
    repository::get::<Item>(&mut tx, item_id).await?;
    repository::get::<T>(&mut tx, other_id).await?;
    let changed = if attach {
        repository::link(&mut tx, table, item_id, other_id).await?
    } else {
        repository::unlink(&mut tx, table, item_id, other_id).await?
    };
    tx.commit().await?;
    debug!(item_id, target = T::NAME, other_id, attach, changed, "item link");
    Ok(())
}

pub async fn add_tag(ctx: &AppContext, item_id: i64, tag_id: i64) -> Result<(), ServiceError> {
    set_link::<Tag>(ctx, LinkTable::ItemTags, item_id, tag_id, true).await
}

pub async fn remove_tag(ctx: &AppContext, item_id: i64, tag_id: i64) -> Result<(), ServiceError> {
    set_link::<Tag>(ctx, LinkTable::ItemTags, item_id, tag_id, false).await
}

pub async fn add_to_collection(
    ctx: &AppContext,
    item_id: i64,
    collection_id: i64,
) -> Result<(), ServiceError> {
    set_link::<Collection>(ctx, LinkTable::CollectionItems, item_id, collection_id, true).await
}

pub async fn remove_from_collection(
    ctx: &AppContext,
    item_id: i64,
    collection_id: i64,
) -> Result<(), ServiceError> {
    set_link::<Collection>(ctx, LinkTable::CollectionItems, item_id, collection_id, false).await
}
