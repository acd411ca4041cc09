use crate::error::ServiceError;

/// Maps domain errors to structured error codes and optional tips.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
}

impl ToStructuredError for ServiceError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            ServiceError::InvalidParams(_) => ("INVALID_PARAMS", None),
            ServiceError::NotFound { .. } => ("NOT_FOUND", None),
            ServiceError::Duplicated {
                is_deleted: true, ..
            } => (
                "DUPLICATED",
                Some("A deleted record with this name exists; restore it from the recycle bin"),
            ),
            ServiceError::Duplicated { .. } => ("DUPLICATED", None),
            ServiceError::FieldRequired { .. } => ("FIELD_REQUIRED", None),
            ServiceError::InvalidFieldValue { .. } => ("INVALID_FIELD_VALUE", None),
            ServiceError::InvalidFilter { .. } => ("INVALID_FILTER", None),
            ServiceError::FieldNotFound(_) => ("FIELD_NOT_FOUND", None),
            ServiceError::BoolArrayQuery => ("BOOL_ARRAY_QUERY", None),
            ServiceError::DatetimeArrayQuery => ("DATETIME_ARRAY_QUERY", None),
            ServiceError::UnsupportedArrayField(_) => (
                "UNSUPPORTED_ARRAY_FIELD",
                Some("Only string and int fields can hold arrays"),
            ),
            ServiceError::UnsupportedFieldType(_) => (
                "UNSUPPORTED_FIELD_TYPE",
                Some("Use 1 (string), 2 (int), 3 (bool) or 4 (datetime)"),
            ),
            ServiceError::Unauthorized => (
                "UNAUTHORIZED",
                Some("Log in via /api/user/login and send the token in the Authorization header"),
            ),
            ServiceError::InvalidCredentials => ("INVALID_CREDENTIALS", None),
            ServiceError::PasswordHash(_) => ("PASSWORD_HASH_ERROR", None),
            ServiceError::Token(_) => ("TOKEN_ERROR", None),
            ServiceError::Database(_) => ("DATABASE_ERROR", Some("See the log file for details")),
            ServiceError::Serialization(_) => ("SERIALIZATION_ERROR", None),
        }
    }
}
