use axum::extract::State;
use serde::Deserialize;

use crate::context::AppContext;
use crate::model::{ItemDetail, ListResponse};
use crate::server::extract::{Id, IdPair, JsonBody, ListQuery, QueryParams};
use crate::server::response::{done, ok, ApiResult};
use crate::service::item::{self, ItemInput, SearchRequest};

#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
    pub category_id: i64,
    pub item: ItemInput,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
    pub item: ItemInput,
}

pub async fn list(
    State(ctx): State<AppContext>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<ListResponse<ItemDetail>> {
    ok(item::list(&ctx, &query.into()).await?)
}

pub async fn search(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<SearchRequest>,
) -> ApiResult<ListResponse<ItemDetail>> {
    ok(item::search(&ctx, &body).await?)
}

pub async fn get(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult<ItemDetail> {
    ok(item::get(&ctx, id).await?)
}

pub async fn create(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<CreateItemBody>,
) -> ApiResult<ItemDetail> {
    ok(item::create(&ctx, body.category_id, &body.item).await?)
}

pub async fn update(
    State(ctx): State<AppContext>,
    Id(id): Id,
    JsonBody(body): JsonBody<UpdateItemBody>,
) -> ApiResult<ItemDetail> {
    ok(item::update(&ctx, id, &body.item).await?)
}

pub async fn delete(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    item::delete(&ctx, id).await?;
    done()
}

pub async fn restore(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    item::restore(&ctx, id).await?;
    done()
}

pub async fn add_tag(State(ctx): State<AppContext>, IdPair(id, tag_id): IdPair) -> ApiResult {
    item::add_tag(&ctx, id, tag_id).await?;
    done()
}

pub async fn remove_tag(
    State(ctx): State<AppContext>,
    IdPair(id, tag_id): IdPair,
) -> ApiResult {
    item::remove_tag(&ctx, id, tag_id).await?;
    done()
}

pub async fn add_to_collection(
    State(ctx): State<AppContext>,
    IdPair(id, collection_id): IdPair,
) -> ApiResult {
    item::add_to_collection(&ctx, id, collection_id).await?;
    done()
}

pub async fn remove_from_collection(
    State(ctx): State<AppContext>,
    IdPair(id, collection_id): IdPair,
) -> ApiResult {
    item::remove_from_collection(&ctx, id, collection_id).await?;
    done()
}
