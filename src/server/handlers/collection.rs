use axum::extract::State;

use crate::context::AppContext;
use crate::model::{CollectionView, ListResponse};
use crate::server::extract::{Id, JsonBody, ListQuery, QueryParams};
use crate::server::response::{done, ok, ApiResult};
use crate::service::collection::{self, CollectionInput};

pub async fn list(
    State(ctx): State<AppContext>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<ListResponse<CollectionView>> {
    ok(collection::list(&ctx, &query.into()).await?)
}

pub async fn get(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult<CollectionView> {
    ok(collection::get(&ctx, id).await?)
}

pub async fn create(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<CollectionInput>,
) -> ApiResult<CollectionView> {
    ok(collection::create(&ctx, &body).await?)
}

pub async fn update(
    State(ctx): State<AppContext>,
    Id(id): Id,
    JsonBody(body): JsonBody<CollectionInput>,
) -> ApiResult<CollectionView> {
    ok(collection::update(&ctx, id, &body).await?)
}

pub async fn delete(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    collection::delete(&ctx, id).await?;
    done()
}

pub async fn restore(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    collection::restore(&ctx, id).await?;
    done()
}
