//! Unified error type for repository and service operations.
use thiserror::Error;

use crate::model::FieldType;

/// Coarse classification used for logging. Every class is reported to the
/// caller through the same envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input: invalid params, duplicates, missing records.
    User,
    /// The request references a schema element that does not exist, or asks
    /// for something the schema forbids.
    Domain,
    /// Storage failure.
    Internal,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("{entity} already exists")]
    Duplicated {
        entity: &'static str,
        id: i64,
        is_deleted: bool,
    },
    #[error("field {field} is required")]
    FieldRequired { field: String },
    #[error("invalid value for field {field}: expected {expected}")]
    InvalidFieldValue {
        field: String,
        expected: &'static str,
    },
    #[error("invalid filter for field {field}: {reason}")]
    InvalidFilter { field: String, reason: &'static str },
    #[error("field not found: {0}")]
    FieldNotFound(i64),
    #[error("bool array query is not supported")]
    BoolArrayQuery,
    #[error("datetime array query is not supported")]
    DatetimeArrayQuery,
    #[error("{0} array fields are not supported")]
    UnsupportedArrayField(FieldType),
    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(i64),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidParams(_)
            | Self::NotFound { .. }
            | Self::Duplicated { .. }
            | Self::FieldRequired { .. }
            | Self::InvalidFieldValue { .. }
            | Self::InvalidFilter { .. }
            | Self::Unauthorized
            | Self::InvalidCredentials => ErrorClass::User,
            Self::FieldNotFound(_)
            | Self::BoolArrayQuery
            | Self::DatetimeArrayQuery
            | Self::UnsupportedArrayField(_)
            | Self::UnsupportedFieldType(_) => ErrorClass::Domain,
            Self::Database(_)
            | Self::Serialization(_)
            | Self::PasswordHash(_)
            | Self::Token(_) => ErrorClass::Internal,
        }
    }

    /// Extra payload carried in the error envelope.
    #[must_use]
    pub fn data(&self) -> Option<serde_json::Value> {
        match self {
            Self::Duplicated { id, is_deleted, .. } => {
                Some(serde_json::json!({ "id": id, "isDeleted": is_deleted }))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../error_tests.rs"]
mod error_tests;
