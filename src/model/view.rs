use serde::Serialize;
use serde_json::Value;

use super::{Category, Collection, Field, FieldType, Item, Tag};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub is_array: bool,
    pub required: bool,
}

impl From<&Field> for FieldView {
    fn from(field: &Field) -> Self {
        Self {
            id: field.id,
            name: field.name.clone(),
            field_type: field.field_type,
            is_array: field.is_array,
            required: field.required,
        }
    }
}

/// Category with its active fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDetail {
    pub id: i64,
    pub name: String,
    pub fields: Vec<FieldView>,
}

impl CategoryDetail {
    #[must_use]
    pub fn new(category: &Category, fields: &[Field]) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            fields: fields.iter().map(FieldView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagView {
    pub id: i64,
    pub name: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionView {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<&Collection> for CollectionView {
    fn from(collection: &Collection) -> Self {
        Self {
            id: collection.id,
            name: collection.name.clone(),
            description: collection.description.clone(),
        }
    }
}

/// One field's value on an item: a scalar, or a list for array fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValueView {
    pub field_id: i64,
    pub field_name: String,
    pub field_type: FieldType,
    pub value: Value,
}

/// Fully hydrated item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub item: Item,
    pub category: Option<CategoryRef>,
    pub tags: Vec<TagView>,
    pub collections: Vec<CollectionView>,
    pub values: Vec<FieldValueView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse<T> {
    pub list: Vec<T>,
    pub total: i64,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn new(list: Vec<T>, total: i64) -> Self {
        Self { list, total }
    }
}
