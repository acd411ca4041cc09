//! Extractors whose rejections come back in the standard envelope as
//! `InvalidParams` instead of axum's plain-text errors.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::Json;
use http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::response::ApiError;
use crate::error::ServiceError;
use crate::model::EntityKind;
use crate::repository::Pagination;

/// JSON request body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServiceError::invalid(rejection.body_text()).into()),
        }
    }
}

fn positive(id: i64) -> Result<i64, ApiError> {
    if id < 1 {
        return Err(ServiceError::invalid("id must be a positive integer").into());
    }
    Ok(id)
}

/// A single positive `:id` path segment.
#[derive(Debug, Clone, Copy)]
pub struct Id(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Id {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|r| ApiError(ServiceError::invalid(r.body_text())))?;
        Ok(Self(positive(id)?))
    }
}

/// Two positive path segments, e.g. `/:id/tag/:tag_id`.
#[derive(Debug, Clone, Copy)]
pub struct IdPair(pub i64, pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for IdPair {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((a, b)) = Path::<(i64, i64)>::from_request_parts(parts, state)
            .await
            .map_err(|r| ApiError(ServiceError::invalid(r.body_text())))?;
        Ok(Self(positive(a)?, positive(b)?))
    }
}

/// Query string decoded into `T`.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|r| ApiError(ServiceError::invalid(r.body_text())))?;
        Ok(Self(value))
    }
}

/// `?page=&page_size=&no_paging=` on list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
    #[serde(default)]
    pub no_paging: bool,
}

impl From<ListQuery> for Pagination {
    fn from(q: ListQuery) -> Self {
        Self {
            disable: q.no_paging,
            page: q.page,
            size: q.page_size,
        }
    }
}

/// `?type=&page=&page_size=&no_paging=` on the recycle bin listing.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeletedQuery {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
    #[serde(default)]
    pub no_paging: bool,
}

impl DeletedQuery {
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination {
            disable: self.no_paging,
            page: self.page,
            size: self.page_size,
        }
    }
}
