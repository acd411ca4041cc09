use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::repository::Entity;

/// Role code of the account seeded on first start.
pub const ROLE_ADMIN: i64 = 1;

/// A login account. Only consulted while authentication is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const NAME: &'static str = "user";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
