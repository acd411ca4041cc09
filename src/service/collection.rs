use serde::Deserialize;
use tracing::info;

use super::{ensure_unique, lifecycle, require_name};
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::model::{Collection, CollectionView, ListResponse};
use crate::repository::{self, Filter, OrderBy, Pagination, Scope};

/// Body of collection create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub async fn create(
    ctx: &AppContext,
    input: &CollectionInput,
) -> Result<CollectionView, ServiceError> {
    let name = require_name(&input.name)?;
    let mut tx = ctx.pool.begin().await?;
    ensure_unique::<Collection>(&mut tx, vec![Filter::eq("name", name.as_str())], None).await?;
    let collection = repository::create::<Collection>(
        &mut tx,
        &[
            ("name", name.into()),
            ("description", input.description.trim().into()),
        ],
    )
    .await?;
    tx.commit().await?;
    info!(collection_id = collection.id, name = %collection.name, "collection created");
    Ok(CollectionView::from(&collection))
}

pub async fn get(ctx: &AppContext, id: i64) -> Result<CollectionView, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    let collection = repository::get::<Collection>(&mut conn, id).await?;
    Ok(CollectionView::from(&collection))
}

pub async fn list(
    ctx: &AppContext,
    page: &Pagination,
) -> Result<ListResponse<CollectionView>, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    let (rows, total) = repository::get_list::<Collection>(
        &mut conn,
        Scope::Active,
        &[],
        &[OrderBy::asc("id")],
        page,
    )
    .await?;
    Ok(ListResponse::new(
        rows.iter().map(CollectionView::from).collect(),
        total,
    ))
}

pub async fn update(
    ctx: &AppContext,
    id: i64,
    input: &CollectionInput,
) -> Result<CollectionView, ServiceError> {
    let name = require_name(&input.name)?;
    let mut tx = ctx.pool.begin().await?;
    repository::get::<Collection>(&mut tx, id).await?;
    ensure_unique::<Collection>(&mut tx, vec![Filter::eq("name", name.as_str())], Some(id))
        .await?;
    repository::update::<Collection>(
        &mut tx,
        &[Filter::eq("id", id)],
        &[
            ("name", name.into()),
            ("description", input.description.trim().into()),
        ],
    )
    .await?;
    let collection = repository::get::<Collection>(&mut tx, id).await?;
    tx.commit().await?;
    info!(collection_id = id, "collection updated");
    Ok(CollectionView::from(&collection))
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::delete::<Collection>(ctx, id).await
}

pub async fn restore(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::restore::<Collection>(ctx, id).await
}
