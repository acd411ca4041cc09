use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for Collection {
    const TABLE: &'static str = "collections";
    const NAME: &'static str = "collection";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
