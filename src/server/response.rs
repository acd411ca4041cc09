//! The JSON envelope every endpoint answers with.
//!
//! Responses are always HTTP 200. Success is `{code: 0, msg: "success", data?}`;
//! failure is `{code: 1, msg, error: {code, tip?, logs}, data?}`.

use std::fmt::Display;

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{ErrorClass, ServiceError};
use crate::logging::get_log_file_path;
use crate::server::error_mapping::ToStructuredError;

pub const CODE_SUCCESS: i32 = 0;
pub const CODE_FAILURE: i32 = 1;

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub logs: String,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: Option<T>) -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: "success".to_string(),
            error: None,
            data,
        }
    }
}

impl Envelope<Value> {
    /// Build a failure envelope from any error carrying a structured code.
    pub fn failure<E: ToStructuredError + Display>(err: &E, data: Option<Value>) -> Self {
        let (code, tip) = err.error_code_and_tip();
        Self {
            code: CODE_FAILURE,
            msg: err.to_string(),
            error: Some(ErrorDetail {
                code: code.to_string(),
                tip: tip.map(str::to_string),
                logs: get_log_file_path().to_string(),
            }),
            data,
        }
    }
}

/// Successful handler output.
#[derive(Debug)]
pub struct Success<T>(pub Option<T>);

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(Envelope::success(self.0)).into_response()
    }
}

/// Failed handler output.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.class() {
            ErrorClass::User => debug!(error = %err, "request rejected"),
            ErrorClass::Domain => warn!(error = %err, "request rejected"),
            ErrorClass::Internal => error!(error = %err, "request failed"),
        }
        Json(Envelope::failure(&err, err.data())).into_response()
    }
}

pub type ApiResult<T = ()> = Result<Success<T>, ApiError>;

/// Success carrying `data`.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Success(Some(data)))
}

/// Success without a payload.
pub fn done() -> ApiResult {
    Ok(Success(None))
}
