use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::repository::Entity;

/// One EAV row. Exactly one `value_*` column is populated, matching the
/// owning field's type.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ItemFieldValue {
    pub id: i64,
    pub item_id: i64,
    pub field_id: i64,
    pub value_string: Option<String>,
    pub value_int: Option<i64>,
    pub value_bool: Option<bool>,
    pub value_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for ItemFieldValue {
    const TABLE: &'static str = "item_field_values";
    const NAME: &'static str = "field value";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
