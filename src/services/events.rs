/// Event service - ownership-scoped CRUD plus nested volunteer lists
use crate::db::{event_repo, profile_repo};
use crate::error::{AppError, Result};
use crate::models::{Event, EventVolunteer, EventWithVolunteers};
use crate::security::ownership::ensure_can_modify;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Attach nested volunteer lists to a batch of events with one query.
pub async fn with_volunteers(
    pool: &PgPool,
    events: Vec<Event>,
) -> Result<Vec<EventWithVolunteers>> {
    let event_ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();

    let mut grouped: HashMap<Uuid, Vec<EventVolunteer>> = HashMap::new();
    for row in event_repo::volunteers_for_events(pool, &event_ids).await? {
        grouped.entry(row.event_id).or_default().push(EventVolunteer {
            id: row.id,
            name: row.name,
            phone: row.phone,
        });
    }

    Ok(events
        .into_iter()
        .map(|event| {
            let volunteers = grouped.remove(&event.id).unwrap_or_default();
            EventWithVolunteers { event, volunteers }
        })
        .collect())
}

pub struct EventService {
    pool: PgPool,
}

impl EventService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All events with nested volunteers, soonest date first.
    pub async fn list(&self) -> Result<Vec<EventWithVolunteers>> {
        let events = event_repo::list_all(&self.pool).await?;
        with_volunteers(&self.pool, events).await
    }

    /// Create an event with the caller's profile as creator.
    pub async fn create(
        &self,
        actor: Uuid,
        title: &str,
        description: &str,
        date: DateTime<Utc>,
        location: &str,
    ) -> Result<EventWithVolunteers> {
        let profile = profile_repo::find_by_user_id(&self.pool, actor)
            .await?
            .ok_or_else(|| AppError::NotFound("neighbor profile not found".to_string()))?;

        let event =
            event_repo::create(&self.pool, profile.id, title, description, date, location).await?;

        tracing::info!(event_id = %event.id, profile_id = %profile.id, "event created");
        Ok(EventWithVolunteers {
            event,
            volunteers: Vec::new(),
        })
    }

    pub async fn get(&self, event_id: Uuid) -> Result<EventWithVolunteers> {
        let event = event_repo::find_by_id(&self.pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;
        let volunteers = event_repo::volunteers_for_event(&self.pool, event_id).await?;

        Ok(EventWithVolunteers { event, volunteers })
    }

    /// Volunteers of a single event.
    pub async fn volunteers(&self, event_id: Uuid) -> Result<Vec<EventVolunteer>> {
        event_repo::find_by_id(&self.pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;

        Ok(event_repo::volunteers_for_event(&self.pool, event_id).await?)
    }

    /// Partial update, owner only.
    pub async fn update(
        &self,
        actor: Uuid,
        event_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        date: Option<DateTime<Utc>>,
        location: Option<&str>,
    ) -> Result<EventWithVolunteers> {
        let event = event_repo::find_by_id(&self.pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;
        ensure_can_modify(actor, &event)?;

        let updated =
            event_repo::update_partial(&self.pool, event_id, title, description, date, location)
                .await?
                .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;
        let volunteers = event_repo::volunteers_for_event(&self.pool, event_id).await?;

        Ok(EventWithVolunteers {
            event: updated,
            volunteers,
        })
    }

    /// Delete, owner only. Volunteer associations cascade away.
    pub async fn delete(&self, actor: Uuid, event_id: Uuid) -> Result<()> {
        let event = event_repo::find_by_id(&self.pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;
        ensure_can_modify(actor, &event)?;

        event_repo::delete(&self.pool, event_id).await?;
        tracing::info!(%event_id, "event deleted");
        Ok(())
    }
}
