//! Token check for mutating routes.

use axum::async_trait;
use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;

use super::response::ApiError;
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::service::user::{verify_token, Claims};

/// The caller behind a request. `None` while authentication is disabled.
///
/// Used as route middleware through `from_extractor_with_state`, and as a
/// handler argument where the identity itself matters.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Option<Claims>);

#[async_trait]
impl FromRequestParts<AppContext> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        if !ctx.auth.enable {
            return Ok(Self(None));
        }
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ServiceError::Unauthorized)?;
        let claims = verify_token(&ctx.auth, header)?;
        Ok(Self(Some(claims)))
    }
}
