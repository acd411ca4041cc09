use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for Tag {
    const TABLE: &'static str = "tags";
    const NAME: &'static str = "tag";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
