use tracing::info;

use super::{ensure_unique, lifecycle, require_name};
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::model::{Category, CategoryDetail, Field, ListResponse};
use crate::repository::{self, Filter, OrderBy, Pagination, Scope};

const ORDER: [OrderBy; 1] = [OrderBy::asc("id")];

pub async fn create(ctx: &AppContext, name: &str) -> Result<CategoryDetail, ServiceError> {
    let name = require_name(name)?;
    let mut tx = ctx.pool.begin().await?;
    ensure_unique::<Category>(&mut tx, vec![Filter::eq("name", name.as_str())], None).await?;
    let category = repository::create::<Category>(&mut tx, &[("name", name.into())]).await?;
    tx.commit().await?;
    info!(category_id = category.id, name = %category.name, "category created");
    Ok(CategoryDetail::new(&category, &[]))
}

pub async fn get(ctx: &AppContext, id: i64) -> Result<CategoryDetail, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    let category = repository::get::<Category>(&mut conn, id).await?;
    let (fields, _) = repository::get_list::<Field>(
        &mut conn,
        Scope::Active,
        &[Filter::eq("category_id", id)],
        &ORDER,
        &Pagination::unpaged(),
    )
    .await?;
    Ok(CategoryDetail::new(&category, &fields))
}

/// Categories ordered by id, each with its active fields.
pub async fn list(
    ctx: &AppContext,
    page: &Pagination,
) -> Result<ListResponse<CategoryDetail>, ServiceError> {
    let mut conn = ctx.pool.acquire().await?;
    let (categories, total) =
        repository::get_list::<Category>(&mut conn, Scope::Active, &[], &ORDER, page).await?;
    let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
    let (fields, _) = repository::get_list::<Field>(
        &mut conn,
        Scope::Active,
        &[Filter::in_list("category_id", ids)],
        &ORDER,
        &Pagination::unpaged(),
    )
    .await?;
    let list = categories
        .iter()
        .map(|category| {
            let own: Vec<Field> = fields
                .iter()
                .filter(|f| f.category_id == category.id)
                .cloned()
                .collect();
            CategoryDetail::new(category, &own)
        })
        .collect();
    Ok(ListResponse::new(list, total))
}

pub async fn rename(ctx: &AppContext, id: i64, name: &str) -> Result<CategoryDetail, ServiceError> {
    let name = require_name(name)?;
    let mut tx = ctx.pool.begin().await?;
    repository::get::<Category>(&mut tx, id).await?;
    ensure_unique::<Category>(&mut tx, vec![Filter::eq("name", name.as_str())], Some(id)).await?;
    repository::update::<Category>(&mut tx, &[Filter::eq("id", id)], &[("name", name.into())])
        .await?;
    tx.commit().await?;
    info!(category_id = id, "category renamed");
    get(ctx, id).await
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::delete::<Category>(ctx, id).await
}

pub async fn restore(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::restore::<Category>(ctx, id).await
}
