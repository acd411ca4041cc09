//! Item search across scalar columns, tags, collections and typed field
//! values.
//!
//! Runs in two phases inside one transaction. The first narrows matching items
//! to distinct ids over the tag and collection joins (as a subquery); the
//! second pages over those ids with the regular item ordering so join
//! multiplicity never skews `total`.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::detail::load_details;
use super::ITEM_ORDER;
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::field_value::{build_filter, value_exists};
use crate::model::{Category, Field, Item, ItemDetail, ListResponse};
use crate::repository::{self, matching_ids, Entity, Filter, Join, OrderBy, Pagination, Scope};

const SEARCH_JOINS: [Join; 4] = [
    Join {
        table: "item_tags",
        on: "item_tags.item_id = items.id",
    },
    Join {
        table: "tags",
        on: "tags.id = item_tags.tag_id AND tags.deleted_at IS NULL",
    },
    Join {
        table: "collection_items",
        on: "collection_items.item_id = items.id",
    },
    Join {
        table: "collections",
        on: "collections.id = collection_items.collection_id AND collections.deleted_at IS NULL",
    },
];

/// Search request body. `filters` maps a field id to the value (or value
/// list, or datetime range) to match; all criteria are combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub category_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    #[serde(default)]
    pub collection_ids: Vec<i64>,
    #[serde(default)]
    pub filters: BTreeMap<i64, Value>,
    #[serde(default)]
    pub no_paging: bool,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
}

impl SearchRequest {
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination {
            disable: self.no_paging,
            page: self.page,
            size: self.page_size,
        }
    }

    fn criteria(&self, fields: &HashMap<i64, Field>) -> Result<Vec<Filter>, ServiceError> {
        let mut filters = vec![Filter::eq("items.category_id", self.category_id)];
        let name = self.name.trim();
        if !name.is_empty() {
            filters.push(Filter::like("items.title", name));
        }
        if !self.tag_ids.is_empty() {
            filters.push(Filter::in_list("tags.id", self.tag_ids.iter().copied()));
        }
        if !self.collection_ids.is_empty() {
            filters.push(Filter::in_list(
                "collections.id",
                self.collection_ids.iter().copied(),
            ));
        }
        for (field_id, value) in &self.filters {
            let field = fields
                .get(field_id)
                .ok_or(ServiceError::FieldNotFound(*field_id))?;
            filters.push(value_exists(build_filter(field, value)?));
        }
        Ok(filters)
    }
}

pub async fn search(
    ctx: &AppContext,
    req: &SearchRequest,
) -> Result<ListResponse<ItemDetail>, ServiceError> {
    if req.category_id < 1 {
        return Err(ServiceError::invalid("category_id is required"));
    }
    let mut tx = ctx.pool.begin().await?;
    repository::get::<Category>(&mut tx, req.category_id).await?;
    let (fields, _) = repository::get_list::<Field>(
        &mut tx,
        Scope::Active,
        &[Filter::eq("category_id", req.category_id)],
        &[OrderBy::asc("id")],
        &Pagination::unpaged(),
    )
    .await?;
    let fields: HashMap<i64, Field> = fields.into_iter().map(|f| (f.id, f)).collect();
    let criteria = req.criteria(&fields)?;

    let (items, total) = repository::get_list::<Item>(
        &mut tx,
        Scope::Active,
        &[matching_ids(Item::TABLE, &SEARCH_JOINS, &criteria)],
        &ITEM_ORDER,
        &req.pagination(),
    )
    .await?;
    debug!(category_id = req.category_id, total, "search matched");
    let details = load_details(&mut tx, items).await?;
    tx.commit().await?;
    Ok(ListResponse::new(details, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_decodes_string_field_keys() {
        let req: SearchRequest = serde_json::from_value(json!({
            "category_id": 3,
            "filters": { "7": "dune", "8": [1, 2] },
            "page": 2,
            "page_size": 10
        }))
        .unwrap();
        assert_eq!(req.filters.len(), 2);
        assert_eq!(req.filters.get(&7), Some(&json!("dune")));
        assert_eq!(req.pagination(), Pagination::new(2, 10));
    }

    #[test]
    fn test_criteria_rejects_unknown_field() {
        let req: SearchRequest = serde_json::from_value(json!({
            "category_id": 3,
            "filters": { "99": "x" }
        }))
        .unwrap();
        let err = req.criteria(&HashMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "field not found: 99");
    }

    #[test]
    fn test_criteria_skips_blank_name_and_empty_lists() {
        let req = SearchRequest {
            category_id: 1,
            name: "  ".into(),
            ..SearchRequest::default()
        };
        let criteria = req.criteria(&HashMap::new()).unwrap();
        assert_eq!(criteria, vec![Filter::eq("items.category_id", 1_i64)]);
    }
}
