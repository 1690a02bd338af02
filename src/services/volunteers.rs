/// Volunteer service - unrestricted volunteer CRUD and the idempotent
/// join-event workflow.
///
/// Volunteers are matched to identities by (name, phone) string
/// equality, not by a foreign key. Two identities sharing a phone number
/// collide on this match; that fragility is inherited behavior and kept
/// as is.
use crate::db::{event_repo, profile_repo, volunteer_repo};
use crate::error::{AppError, Result};
use crate::models::Volunteer;
use sqlx::PgPool;
use uuid::Uuid;

const TOP_VOLUNTEERS_LIMIT: i64 = 10;

pub struct VolunteerService {
    pool: PgPool,
}

impl VolunteerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List volunteers; `top` switches to the ten busiest by event count.
    pub async fn list(&self, top: bool) -> Result<Vec<Volunteer>> {
        if top {
            Ok(volunteer_repo::list_top(&self.pool, TOP_VOLUNTEERS_LIMIT).await?)
        } else {
            Ok(volunteer_repo::list_all(&self.pool).await?)
        }
    }

    pub async fn get(&self, volunteer_id: Uuid) -> Result<Volunteer> {
        volunteer_repo::find_by_id(&self.pool, volunteer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("volunteer not found".to_string()))
    }

    async fn ensure_events_exist(&self, event_ids: &[Uuid]) -> Result<()> {
        if event_ids.is_empty() {
            return Ok(());
        }
        let existing = event_repo::count_existing(&self.pool, event_ids).await?;
        if existing as usize != event_ids.len() {
            return Err(AppError::Validation(
                "one or more event ids do not exist".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a volunteer, optionally associated with events up front.
    pub async fn create(&self, name: &str, phone: &str, event_ids: &[Uuid]) -> Result<Volunteer> {
        self.ensure_events_exist(event_ids).await?;

        let mut tx = self.pool.begin().await?;
        let volunteer_id = volunteer_repo::insert_in_tx(&mut tx, name, phone).await?;
        volunteer_repo::associate_many(&mut tx, volunteer_id, event_ids).await?;
        tx.commit().await?;

        self.get(volunteer_id).await
    }

    /// Partial update; a supplied events list replaces the whole set.
    /// No ownership restriction applies to volunteers.
    pub async fn update(
        &self,
        volunteer_id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        event_ids: Option<&[Uuid]>,
    ) -> Result<Volunteer> {
        if let Some(ids) = event_ids {
            self.ensure_events_exist(ids).await?;
        }

        let mut tx = self.pool.begin().await?;
        let updated = volunteer_repo::update_partial(&mut tx, volunteer_id, name, phone).await?;
        if !updated {
            return Err(AppError::NotFound("volunteer not found".to_string()));
        }
        if let Some(ids) = event_ids {
            volunteer_repo::replace_events(&mut tx, volunteer_id, ids).await?;
        }
        tx.commit().await?;

        self.get(volunteer_id).await
    }

    pub async fn delete(&self, volunteer_id: Uuid) -> Result<()> {
        if !volunteer_repo::delete(&self.pool, volunteer_id).await? {
            return Err(AppError::NotFound("volunteer not found".to_string()));
        }
        Ok(())
    }

    /// Join an event as the acting identity.
    ///
    /// Resolves the caller's profile, then looks up a volunteer matching
    /// exactly (name = username, phone = profile phone), creating one if
    /// absent, and associates it with the event. The transaction takes a
    /// per-identity advisory lock before the lookup: under READ COMMITTED
    /// neither of two concurrent joins would see the other's uncommitted
    /// insert, so without the lock both would create the volunteer.
    /// Re-joining is a no-op and still succeeds.
    pub async fn join_event(&self, actor: Uuid, event_id: Uuid) -> Result<&'static str> {
        let event = event_repo::find_by_id(&self.pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;

        let profile = profile_repo::find_by_user_id(&self.pool, actor)
            .await?
            .ok_or_else(|| AppError::NotFound("neighbor profile not found".to_string()))?;

        let mut tx = self.pool.begin().await?;
        volunteer_repo::lock_identity(&mut tx, &profile.username, &profile.phone).await?;

        let volunteer_id =
            match volunteer_repo::find_by_name_phone(&mut tx, &profile.username, &profile.phone)
                .await?
            {
                Some(id) => id,
                None => {
                    volunteer_repo::insert_in_tx(&mut tx, &profile.username, &profile.phone).await?
                }
            };

        volunteer_repo::associate_in_tx(&mut tx, event.id, volunteer_id).await?;
        tx.commit().await?;

        tracing::info!(%event_id, %volunteer_id, "volunteer joined event");
        Ok("Joined the event successfully!")
    }
}
