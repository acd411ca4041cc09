use chrono::{DateTime, Utc};
use serde_json::Value;

use super::coerce;
use crate::error::ServiceError;
use crate::model::{Field, FieldType};
use crate::repository::{merge_wheres, Filter, Op};

/// Inclusive time window used to filter datetime fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatetimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DatetimeRange {
    /// Read `{"start": ..., "end": ...}`.
    #[must_use]
    pub fn parse(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            start: coerce::to_datetime(obj.get("start")?)?,
            end: coerce::to_datetime(obj.get("end")?)?,
        })
    }
}

fn bad_filter(field: &Field, reason: &'static str) -> ServiceError {
    ServiceError::InvalidFilter {
        field: field.name.clone(),
        reason,
    }
}

fn scalar_predicate(field: &Field, value: &Value) -> Result<Filter, ServiceError> {
    match field.field_type {
        FieldType::String => {
            let needle = coerce::to_string(value).ok_or_else(|| bad_filter(field, "expected a string"))?;
            Ok(Filter::like("value_string", &needle))
        }
        FieldType::Int => {
            let n = coerce::to_int(value).ok_or_else(|| bad_filter(field, "expected an int"))?;
            Ok(Filter::eq("value_int", n))
        }
        FieldType::Bool => {
            let b = coerce::to_bool(value).ok_or_else(|| bad_filter(field, "expected a bool"))?;
            Ok(Filter::eq("value_bool", b))
        }
        FieldType::Datetime => {
            let range = DatetimeRange::parse(value)
                .ok_or_else(|| bad_filter(field, "expected a {start, end} range"))?;
            Ok(Filter::raw(
                "value_time >= ? AND value_time <= ?",
                vec![range.start.into(), range.end.into()],
            ))
        }
    }
}

fn array_predicate(field: &Field, value: &Value) -> Result<Filter, ServiceError> {
    match field.field_type {
        FieldType::String => {
            let needles =
                coerce::to_string_list(value).ok_or_else(|| bad_filter(field, "expected strings"))?;
            if needles.is_empty() {
                return Err(bad_filter(field, "empty value list"));
            }
            Ok(merge_wheres(
                Op::Or,
                needles
                    .iter()
                    .map(|needle| Filter::like("value_string", needle))
                    .collect(),
            ))
        }
        FieldType::Int => {
            let ints = coerce::to_int_list(value).ok_or_else(|| bad_filter(field, "expected ints"))?;
            Ok(Filter::in_list("value_int", ints))
        }
        FieldType::Bool => Err(ServiceError::BoolArrayQuery),
        FieldType::Datetime => Err(ServiceError::DatetimeArrayQuery),
    }
}

/// Build the predicate a single field-value row must satisfy.
///
/// Columns are unqualified so the fragment can be evaluated against
/// `item_field_values` directly or inside [`value_exists`].
pub fn build_filter(field: &Field, value: &Value) -> Result<Filter, ServiceError> {
    let predicate = if field.is_array {
        array_predicate(field, value)?
    } else {
        scalar_predicate(field, value)?
    };
    Ok(merge_wheres(
        Op::And,
        vec![Filter::eq("field_id", field.id), predicate],
    ))
}

/// Lift a field-value predicate to an item predicate: some active value row
/// of the item satisfies it. ANDing several of these keeps filters
/// independent per field.
pub fn value_exists(predicate: Filter) -> Filter {
    Filter::raw(
        format!(
            "EXISTS (SELECT 1 FROM item_field_values \
             WHERE item_field_values.item_id = items.id \
             AND item_field_values.deleted_at IS NULL AND {})",
            predicate.clause
        ),
        predicate.args,
    )
}
