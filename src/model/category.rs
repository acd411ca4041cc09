use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const NAME: &'static str = "category";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
