use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::AppContext;
use crate::model::ListResponse;
use crate::server::extract::{DeletedQuery, JsonBody, QueryParams};
use crate::server::response::{done, ok, ApiResult};
use crate::service::recycle_bin::{self, DeletedRef};

/// `{ "list": [{ "id": 1, "type": "item" }, ...] }`
#[derive(Debug, Deserialize)]
pub struct BatchBody {
    pub list: Vec<DeletedRef>,
}

#[derive(Debug, Serialize)]
pub struct RestoredCount {
    pub restored: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearedCount {
    pub deleted: u64,
}

pub async fn list(
    State(ctx): State<AppContext>,
    QueryParams(query): QueryParams<DeletedQuery>,
) -> ApiResult<ListResponse<Value>> {
    ok(recycle_bin::list_deleted(&ctx, query.kind, &query.pagination()).await?)
}

pub async fn restore(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<BatchBody>,
) -> ApiResult<RestoredCount> {
    let restored = recycle_bin::restore(&ctx, &body.list).await?;
    ok(RestoredCount { restored })
}

pub async fn delete(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<BatchBody>,
) -> ApiResult {
    recycle_bin::hard_delete(&ctx, &body.list).await?;
    done()
}

pub async fn clear(State(ctx): State<AppContext>) -> ApiResult<ClearedCount> {
    let deleted = recycle_bin::clear(&ctx).await?;
    ok(ClearedCount { deleted })
}
