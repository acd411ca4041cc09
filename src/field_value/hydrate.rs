use std::collections::{BTreeMap, HashMap};

use chrono::SecondsFormat;
use serde_json::Value;

use crate::model::{Field, FieldType, FieldValueView, ItemFieldValue};

/// Read the populated column of `row` for a field of `field_type`.
#[must_use]
pub fn row_value(field_type: FieldType, row: &ItemFieldValue) -> Value {
    match field_type {
        FieldType::String => row.value_string.clone().map_or(Value::Null, Value::String),
        FieldType::Int => row.value_int.map_or(Value::Null, Value::from),
        FieldType::Bool => row.value_bool.map_or(Value::Null, Value::Bool),
        FieldType::Datetime => row.value_time.map_or(Value::Null, |t| {
            Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }),
    }
}

/// Group an item's value rows by field. Array fields become JSON lists in row
/// order; scalar fields take their single row. Rows whose field is not in
/// `fields` are skipped.
#[must_use]
pub fn hydrate_values(rows: &[ItemFieldValue], fields: &HashMap<i64, Field>) -> Vec<FieldValueView> {
    let mut grouped: BTreeMap<i64, Vec<&ItemFieldValue>> = BTreeMap::new();
    for row in rows {
        if fields.contains_key(&row.field_id) {
            grouped.entry(row.field_id).or_default().push(row);
        }
    }
    grouped
        .into_iter()
        .filter_map(|(field_id, rows)| {
            let field = fields.get(&field_id)?;
            let value = if field.is_array {
                Value::Array(rows.iter().map(|r| row_value(field.field_type, r)).collect())
            } else {
                rows.first()
                    .map_or(Value::Null, |r| row_value(field.field_type, r))
            };
            Some(FieldValueView {
                field_id,
                field_name: field.name.clone(),
                field_type: field.field_type,
                value,
            })
        })
        .collect()
}
