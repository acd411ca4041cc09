use tracing::info;

use super::{ensure_unique, lifecycle, require_name};
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::model::{ListResponse, Tag, TagView};
use crate::repository::{self, Filter, OrderBy, Pagination, Scope};

pub async fn create(ctx: &AppContext, name: &str) -> Result<TagView, ServiceError> {
    let name = require_name(name)?;
    let mut tx = ctx.pool.begin().await?;
    ensure_unique::<Tag>(&mut tx, vec![Filter::eq("name", name.as_str())], None).await?;
    let tag = repository::create::<Tag>(&mut tx, &[("name", name.into())]).await?;
    tx.commit().await?;
    info!(tag_id = tag.id, name = %tag.name, "tag created");
    Ok(TagView::from(&tag))
}

pub async fn get(ctx: &AppContext, id: i64) -> Result<TagView, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    let tag = repository::get::<Tag>(&mut conn, id).await?;
    Ok(TagView::from(&tag))
}

pub async fn list(ctx: &AppContext, page: &Pagination) -> Result<ListResponse<TagView>, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    let (tags, total) =
        repository::get_list::<Tag>(&mut conn, Scope::Active, &[], &[OrderBy::asc("id")], page)
            .await?;
    Ok(ListResponse::new(tags.iter().map(TagView::from).collect(), total))
}

pub async fn rename(ctx: &AppContext, id: i64, name: &str) -> Result<TagView, ServiceError> {
    let name = require_name(name)?;
    let mut tx = ctx.pool.begin().await?;
    repository::get::<Tag>(&mut tx, id).await?;
    ensure_unique::<Tag>(&mut tx, vec![Filter::eq("name", name.as_str())], Some(id)).await?;
    repository::update::<Tag>(&mut tx, &[Filter::eq("id", id)], &[("name", name.into())]).await?;
    let tag = repository::get::<Tag>(&mut tx, id).await?;
    tx.commit().await?;
    info!(tag_id = id, "tag renamed");
    Ok(TagView::from(&tag))
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::delete::<Tag>(ctx, id).await
}

pub async fn restore(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::restore::<Tag>(ctx, id).await
}
