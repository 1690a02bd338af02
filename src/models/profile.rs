use crate::models::{EventWithVolunteers, Post};
use crate::security::ownership::OwnedResource;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Neighbor profile joined with the owning user's username.
///
/// One profile per user (database unique constraint). Mutated only by
/// its owner; deleting it cascades to the posts and events it created.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NeighborProfile {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    /// Username of the linked user
    #[serde(rename = "user")]
    pub username: String,
    pub house_number: String,
    pub street: String,
    pub postal_code: Option<String>,
    pub phone: String,
    pub bio: Option<String>,
}

impl OwnedResource for NeighborProfile {
    fn owner_user_id(&self) -> Uuid {
        self.user_id
    }

    fn resource_kind(&self) -> &'static str {
        "profile"
    }
}

/// Aggregate view of a profile: everything it created plus the events
/// it joined through the volunteer name/phone match.
#[derive(Debug, Serialize)]
pub struct ProfileBundle {
    pub profile: NeighborProfile,
    /// Included on the my-profile view only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_complete: Option<bool>,
    pub posts: Vec<Post>,
    pub created_events: Vec<EventWithVolunteers>,
    pub joined_events: Vec<EventWithVolunteers>,
}
