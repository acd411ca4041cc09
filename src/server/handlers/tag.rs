use axum::extract::State;

use super::NameBody;
use crate::context::AppContext;
use crate::model::{ListResponse, TagView};
use crate::server::extract::{Id, JsonBody, ListQuery, QueryParams};
use crate::server::response::{done, ok, ApiResult};
use crate::service::tag;

pub async fn list(
    State(ctx): State<AppContext>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<ListResponse<TagView>> {
    ok(tag::list(&ctx, &query.into()).await?)
}

pub async fn get(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult<TagView> {
    ok(tag::get(&ctx, id).await?)
}

pub async fn create(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<NameBody>,
) -> ApiResult<TagView> {
    ok(tag::create(&ctx, &body.name).await?)
}

pub async fn rename(
    State(ctx): State<AppContext>,
    Id(id): Id,
    JsonBody(body): JsonBody<NameBody>,
) -> ApiResult<TagView> {
    ok(tag::rename(&ctx, id, &body.name).await?)
}

pub async fn delete(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    tag::delete(&ctx, id).await?;
    done()
}

pub async fn restore(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    tag::restore(&ctx, id).await?;
    done()
}
