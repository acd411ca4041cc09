use axum::extract::State;

use super::NameBody;
use crate::context::AppContext;
use crate::model::{CategoryDetail, ListResponse};
use crate::server::extract::{Id, JsonBody, ListQuery, QueryParams};
use crate::server::response::{done, ok, ApiResult};
use crate::service::category;

pub async fn list(
    State(ctx): State<AppContext>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<ListResponse<CategoryDetail>> {
    ok(category::list(&ctx, &query.into()).await?)
}

pub async fn get(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult<CategoryDetail> {
    ok(category::get(&ctx, id).await?)
}

pub async fn create(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<NameBody>,
) -> ApiResult<CategoryDetail> {
    ok(category::create(&ctx, &body.name).await?)
}

pub async fn rename(
    State(ctx): State<AppContext>,
    Id(id): Id,
    JsonBody(body): JsonBody<NameBody>,
) -> ApiResult<CategoryDetail> {
    ok(category::rename(&ctx, id, &body.name).await?)
}

pub async fn delete(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    category::delete(&ctx, id).await?;
    done()
}

pub async fn restore(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    category::restore(&ctx, id).await?;
    done()
}
