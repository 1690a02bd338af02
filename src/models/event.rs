use crate::security::ownership::OwnedResource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Event joined with its creator's username and user id.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub profile_id: Uuid,
    #[serde(skip_serializing)]
    pub created_by_user_id: Uuid,
    /// Creator username
    pub created_by: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
}

impl OwnedResource for Event {
    fn owner_user_id(&self) -> Uuid {
        self.created_by_user_id
    }

    fn resource_kind(&self) -> &'static str {
        "event"
    }
}

/// Volunteer as nested inside an event representation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventVolunteer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

/// Event with its nested volunteer list.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithVolunteers {
    #[serde(flatten)]
    pub event: Event,
    pub volunteers: Vec<EventVolunteer>,
}
