use axum::extract::State;

use crate::context::AppContext;
use crate::model::FieldView;
use crate::server::extract::{Id, JsonBody};
use crate::server::response::{done, ok, ApiResult};
use crate::service::field::{self, NewField};

pub async fn create(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<NewField>,
) -> ApiResult<FieldView> {
    ok(field::create(&ctx, &body).await?)
}

pub async fn delete(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    field::delete(&ctx, id).await?;
    done()
}

pub async fn restore(State(ctx): State<AppContext>, Id(id): Id) -> ApiResult {
    field::restore(&ctx, id).await?;
    done()
}
