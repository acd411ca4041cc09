use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::FieldType;
use crate::repository::Entity;

/// A user-defined schema cell owned by a category.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Field {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "i64")]
    pub field_type: FieldType,
    pub is_array: bool,
    pub required: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for Field {
    const TABLE: &'static str = "fields";
    const NAME: &'static str = "field";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
