use crate::security::ownership::OwnedResource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Post joined with its creator's username and user id.
///
/// The creator is fixed at creation and never reassigned; `created_at`
/// is set once by the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub profile_id: Uuid,
    #[serde(skip_serializing)]
    pub created_by_user_id: Uuid,
    /// Creator username
    pub created_by: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OwnedResource for Post {
    fn owner_user_id(&self) -> Uuid {
        self.created_by_user_id
    }

    fn resource_kind(&self) -> &'static str {
        "post"
    }
}
