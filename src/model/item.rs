use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::ItemStatus;
use crate::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    #[sqlx(try_from = "i64")]
    pub status: ItemStatus,
    pub rating: Option<f64>,
    pub description: String,
    pub notes: String,
    pub cover_url: String,
    pub source_url: String,
    pub priority: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for Item {
    const TABLE: &'static str = "items";
    const NAME: &'static str = "item";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
