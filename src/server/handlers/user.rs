use axum::extract::State;

use crate::context::AppContext;
use crate::server::auth::Authenticated;
use crate::server::extract::JsonBody;
use crate::server::response::{done, ok, ApiResult, Success};
use crate::service::user::{self, LoginRequest, LoginResponse, UpdateUserRequest};

pub async fn enabled(State(ctx): State<AppContext>) -> ApiResult<bool> {
    ok(ctx.auth.enable)
}

pub async fn login(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    Ok(Success(user::login(&ctx, &body).await?))
}

pub async fn update(
    State(ctx): State<AppContext>,
    Authenticated(claims): Authenticated,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> ApiResult {
    if let Some(claims) = claims {
        user::update(&ctx, claims.id, &body).await?;
    }
    done()
}
