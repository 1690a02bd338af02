use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Volunteer record with the ids of the events it has joined.
///
/// Volunteers are identified by the (name, phone) pair for join-event
/// idempotence; there is no hard uniqueness constraint and no user
/// foreign key, so two identities sharing a phone number would collide
/// on the match. Volunteers carry no ownership guard: any authenticated
/// caller may edit or delete any record.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Volunteer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub joined_at: DateTime<Utc>,
    pub events: Vec<Uuid>,
}
