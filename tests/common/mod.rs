//! Common test utilities

#![allow(dead_code)]

use collectify::context::AppContext;
use collectify::model::{CategoryDetail, FieldType, FieldView, ItemDetail};
use collectify::service::item::ItemInput;
use collectify::service::{category, field, item};
use collectify::store;
use serde_json::{json, Value};

/// Fresh in-memory database with the schema applied.
pub async fn test_context(recycle_bin: bool) -> AppContext {
    let pool = store::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    AppContext::new(pool, recycle_bin)
}

pub async fn seed_category(ctx: &AppContext, name: &str) -> CategoryDetail {
    category::create(ctx, name)
        .await
        .expect("Should create category")
}

pub async fn seed_field(
    ctx: &AppContext,
    category_id: i64,
    name: &str,
    field_type: FieldType,
    is_array: bool,
) -> FieldView {
    let input = serde_json::from_value(json!({
        "category_id": category_id,
        "name": name,
        "type": field_type.code(),
        "is_array": is_array,
    }))
    .expect("valid field body");
    field::create(ctx, &input).await.expect("Should create field")
}

pub fn item_input(title: &str, values: &[(i64, Value)]) -> ItemInput {
    let values: Vec<Value> = values
        .iter()
        .map(|(field_id, value)| json!({ "field_id": field_id, "value": value }))
        .collect();
    serde_json::from_value(json!({
        "title": title,
        "status": 1,
        "values": values,
    }))
    .expect("valid item body")
}

pub async fn seed_item(
    ctx: &AppContext,
    category_id: i64,
    title: &str,
    values: &[(i64, Value)],
) -> ItemDetail {
    item::create(ctx, category_id, &item_input(title, values))
        .await
        .expect("Should create item")
}

/// Field value of `detail` for `field_id`, if any.
pub fn value_of(detail: &ItemDetail, field_id: i64) -> Option<Value> {
    detail
        .values
        .iter()
        .find(|v| v.field_id == field_id)
        .map(|v| v.value.clone())
}
