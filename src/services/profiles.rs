/// Profile service - neighbor views and the aggregate profile bundles
use crate::db::{event_repo, post_repo, profile_repo};
use crate::error::{AppError, Result};
use crate::models::{NeighborProfile, ProfileBundle};
use crate::security::ownership::ensure_can_modify;
use crate::services::events::with_volunteers;
use sqlx::PgPool;
use uuid::Uuid;

pub use crate::db::profile_repo::UpdateProfileFields;

/// True iff every named field of the profile is non-empty. Field names
/// must match profile columns; an unknown name can never be satisfied
/// and is logged so a misconfigured checklist is visible instead of
/// silently passing.
pub fn is_complete(profile: &NeighborProfile, required_fields: &[String]) -> bool {
    required_fields.iter().all(|field| match field.as_str() {
        "house_number" => !profile.house_number.is_empty(),
        "street" => !profile.street.is_empty(),
        "postal_code" => profile
            .postal_code
            .as_deref()
            .map_or(false, |v| !v.is_empty()),
        "phone" => !profile.phone.is_empty(),
        "bio" => profile.bio.as_deref().map_or(false, |v| !v.is_empty()),
        other => {
            tracing::warn!(field = other, "unknown profile field in required-field list");
            false
        }
    })
}

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn require_own_profile(&self, actor: Uuid) -> Result<NeighborProfile> {
        profile_repo::find_by_user_id(&self.pool, actor)
            .await?
            .ok_or_else(|| AppError::NotFound("neighbor profile not found".to_string()))
    }

    /// Profiles sharing the caller's postal code, excluding the caller.
    /// A caller without a profile (or without a postal code) gets an
    /// empty list, not an error.
    pub async fn neighbors(&self, actor: Uuid) -> Result<Vec<NeighborProfile>> {
        let me = match profile_repo::find_by_user_id(&self.pool, actor).await? {
            Some(profile) => profile,
            None => return Ok(Vec::new()),
        };

        let postal_code = match me.postal_code.as_deref() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => return Ok(Vec::new()),
        };

        Ok(profile_repo::list_by_postal_code_excluding(&self.pool, &postal_code, me.id).await?)
    }

    /// Create the caller's profile. At most one per identity.
    pub async fn create(
        &self,
        actor: Uuid,
        house_number: &str,
        street: &str,
        postal_code: Option<&str>,
        phone: &str,
        bio: Option<&str>,
    ) -> Result<NeighborProfile> {
        if profile_repo::find_by_user_id(&self.pool, actor).await?.is_some() {
            return Err(AppError::Conflict(
                "a profile already exists for this user".to_string(),
            ));
        }

        let profile =
            profile_repo::create(&self.pool, actor, house_number, street, postal_code, phone, bio)
                .await?;

        tracing::info!(profile_id = %profile.id, "profile created");
        Ok(profile)
    }

    /// Profile detail bundle: the profile plus everything it created and
    /// the events it joined through the volunteer name/phone match.
    pub async fn detail(&self, profile_id: Uuid) -> Result<ProfileBundle> {
        let profile = profile_repo::find_by_id(&self.pool, profile_id)
            .await?
            .ok_or_else(|| AppError::NotFound("neighbor profile not found".to_string()))?;

        self.bundle(profile, None).await
    }

    /// My-profile bundle: detail bundle for the caller's own profile
    /// plus the `profile_complete` flag.
    pub async fn my_bundle(
        &self,
        actor: Uuid,
        required_fields: &[String],
    ) -> Result<ProfileBundle> {
        let profile = self.require_own_profile(actor).await?;
        let complete = is_complete(&profile, required_fields);

        self.bundle(profile, Some(complete)).await
    }

    async fn bundle(
        &self,
        profile: NeighborProfile,
        profile_complete: Option<bool>,
    ) -> Result<ProfileBundle> {
        let posts = post_repo::list_by_profile(&self.pool, profile.id).await?;

        let created = event_repo::list_by_profile(&self.pool, profile.id).await?;
        let created_events = with_volunteers(&self.pool, created).await?;

        let joined = event_repo::list_joined(&self.pool, &profile.username, &profile.phone).await?;
        let joined_events = with_volunteers(&self.pool, joined).await?;

        Ok(ProfileBundle {
            profile,
            profile_complete,
            posts,
            created_events,
            joined_events,
        })
    }

    /// Partial update of the caller's own profile.
    pub async fn update_my(
        &self,
        actor: Uuid,
        fields: &UpdateProfileFields,
    ) -> Result<NeighborProfile> {
        let profile = self.require_own_profile(actor).await?;

        profile_repo::update_partial(&self.pool, profile.id, fields)
            .await?
            .ok_or_else(|| AppError::NotFound("neighbor profile not found".to_string()))
    }

    /// Delete a profile by id, owner only. Posts and events cascade.
    pub async fn delete(&self, actor: Uuid, profile_id: Uuid) -> Result<()> {
        let profile = profile_repo::find_by_id(&self.pool, profile_id)
            .await?
            .ok_or_else(|| AppError::NotFound("neighbor profile not found".to_string()))?;
        ensure_can_modify(actor, &profile)?;

        profile_repo::delete(&self.pool, profile_id).await?;
        tracing::info!(%profile_id, "profile deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(postal_code: Option<&str>, phone: &str, street: &str) -> NeighborProfile {
        NeighborProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            house_number: "12b".to_string(),
            street: street.to_string(),
            postal_code: postal_code.map(str::to_string),
            phone: phone.to_string(),
            bio: None,
        }
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn complete_when_all_required_fields_filled() {
        let p = profile(Some("22095"), "555-1000", "Elm Street");
        assert!(is_complete(&p, &fields(&["phone", "street", "postal_code"])));
    }

    #[test]
    fn incomplete_when_any_required_field_empty() {
        let p = profile(Some("22095"), "", "Elm Street");
        assert!(!is_complete(&p, &fields(&["phone", "street", "postal_code"])));

        let p = profile(None, "555-1000", "Elm Street");
        assert!(!is_complete(&p, &fields(&["phone", "street", "postal_code"])));
    }

    #[test]
    fn unknown_field_names_are_never_satisfied() {
        // A checklist naming columns the schema does not have must fail
        // loudly rather than report a complete profile.
        let p = profile(Some("22095"), "555-1000", "Elm Street");
        assert!(!is_complete(&p, &fields(&["phone", "street_name", "city"])));
    }

    #[test]
    fn empty_field_list_is_trivially_complete() {
        let p = profile(None, "", "");
        assert!(is_complete(&p, &[]));
    }
}
