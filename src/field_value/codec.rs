use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::SqliteConnection;

use super::coerce;
use crate::error::ServiceError;
use crate::model::{Field, FieldType, ItemFieldValue};
use crate::repository::{self, Assignment, SqlArg};

/// One typed storage cell produced from a request value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValueData {
    String(String),
    Int(i64),
    Bool(bool),
    Time(DateTime<Utc>),
}

impl FieldValueData {
    fn assignment(&self) -> Assignment {
        match self {
            Self::String(v) => ("value_string", SqlArg::Text(v.clone())),
            Self::Int(v) => ("value_int", SqlArg::Int(*v)),
            Self::Bool(v) => ("value_bool", SqlArg::Bool(*v)),
            Self::Time(v) => ("value_time", SqlArg::Time(*v)),
        }
    }
}

fn invalid(field: &Field, expected: &'static str) -> ServiceError {
    ServiceError::InvalidFieldValue {
        field: field.name.clone(),
        expected,
    }
}

fn required(field: &Field) -> ServiceError {
    ServiceError::FieldRequired {
        field: field.name.clone(),
    }
}

fn check_required(field: &Field, value: &Value) -> Result<(), ServiceError> {
    let missing = match field.field_type {
        FieldType::String => {
            let list = coerce::to_string_list(value).ok_or_else(|| invalid(field, "string"))?;
            match list.as_slice() {
                [] => true,
                [only] => only.is_empty(),
                _ => false,
            }
        }
        FieldType::Int => coerce::to_int_list(value)
            .ok_or_else(|| invalid(field, "int"))?
            .is_empty(),
        FieldType::Bool | FieldType::Datetime => value.is_null(),
    };
    if missing {
        return Err(required(field));
    }
    Ok(())
}

/// `null` reads as the zero value for int and bool, as an empty (rejected)
/// string, and as an invalid datetime.
fn encode_scalar(field: &Field, value: &Value) -> Result<FieldValueData, ServiceError> {
    match field.field_type {
        FieldType::Int if value.is_null() => Ok(FieldValueData::Int(0)),
        FieldType::Bool if value.is_null() => Ok(FieldValueData::Bool(false)),
        FieldType::String => {
            let s = coerce::to_string(value).ok_or_else(|| invalid(field, "string"))?;
            if s.is_empty() {
                return Err(required(field));
            }
            Ok(FieldValueData::String(s))
        }
        FieldType::Int => coerce::to_int(value)
            .map(FieldValueData::Int)
            .ok_or_else(|| invalid(field, "int")),
        FieldType::Bool => coerce::to_bool(value)
            .map(FieldValueData::Bool)
            .ok_or_else(|| invalid(field, "bool")),
        FieldType::Datetime => coerce::to_datetime(value)
            .map(FieldValueData::Time)
            .ok_or_else(|| invalid(field, "datetime")),
    }
}

fn encode_array(field: &Field, value: &Value) -> Result<Vec<FieldValueData>, ServiceError> {
    match field.field_type {
        FieldType::String => Ok(coerce::to_string_list(value)
            .ok_or_else(|| invalid(field, "string list"))?
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(FieldValueData::String)
            .collect()),
        FieldType::Int => Ok(coerce::to_int_list(value)
            .ok_or_else(|| invalid(field, "int list"))?
            .into_iter()
            .map(FieldValueData::Int)
            .collect()),
        FieldType::Bool | FieldType::Datetime => {
            Err(ServiceError::UnsupportedArrayField(field.field_type))
        }
    }
}

/// Translate a request value for `field` into storage cells.
///
/// A scalar field always yields exactly one cell or an error; a `null` array
/// yields none. Scalar strings may never be empty; empty elements of string
/// arrays are dropped.
pub fn encode(field: &Field, value: &Value) -> Result<Vec<FieldValueData>, ServiceError> {
    if field.is_array && !field.field_type.supports_array() {
        return Err(ServiceError::UnsupportedArrayField(field.field_type));
    }
    if field.required {
        check_required(field, value)?;
    }
    if field.is_array {
        encode_array(field, value)
    } else {
        encode_scalar(field, value).map(|cell| vec![cell])
    }
}

/// Encode `value` and insert one row per cell. Runs on the caller's
/// connection; transaction boundaries belong to the caller.
pub async fn store_values(
    conn: &mut SqliteConnection,
    item_id: i64,
    field: &Field,
    value: &Value,
) -> Result<usize, ServiceError> {
    let cells = encode(field, value)?;
    for cell in &cells {
        repository::create::<ItemFieldValue>(
            conn,
            &[
                ("item_id", SqlArg::Int(item_id)),
                ("field_id", SqlArg::Int(field.id)),
                cell.assignment(),
            ],
        )
        .await?;
    }
    Ok(cells.len())
}
