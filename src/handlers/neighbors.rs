/// Neighbor handlers - profile creation, neighbor listing and detail views
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::services::ProfileService;
use crate::validators;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 10))]
    pub house_number: String,

    #[validate(length(min = 1, max = 100))]
    pub street: String,

    #[validate(length(max = 10))]
    pub postal_code: Option<String>,

    #[validate(length(min = 1, max = 15))]
    pub phone: String,

    #[validate(length(max = 1000))]
    pub bio: Option<String>,
}

/// Profiles in the caller's postal code, caller excluded. A caller
/// without a profile gets an empty list.
/// GET /api/v1/neighbors
pub async fn list_neighbors(pool: web::Data<PgPool>, user: AuthUser) -> Result<HttpResponse> {
    let service = ProfileService::new((**pool).clone());
    let neighbors = service.neighbors(user.id).await?;

    Ok(HttpResponse::Ok().json(neighbors))
}

/// Create the caller's neighbor profile. At most one per account.
/// POST /api/v1/neighbors
pub async fn create_profile(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreateProfileRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    if !validators::validate_phone(&req.phone) {
        return Err(AppError::Validation("invalid phone number".to_string()));
    }

    let service = ProfileService::new((**pool).clone());
    let profile = service
        .create(
            user.id,
            &req.house_number,
            &req.street,
            req.postal_code.as_deref(),
            &req.phone,
            req.bio.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(profile))
}

/// Detail view of any neighbor: profile plus their posts, created
/// events and joined events.
/// GET /api/v1/neighbors/{profile_id}
pub async fn get_neighbor(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    profile_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ProfileService::new((**pool).clone());
    let bundle = service.detail(*profile_id).await?;

    Ok(HttpResponse::Ok().json(bundle))
}

/// Delete a profile, owner only. Posts and events cascade.
/// DELETE /api/v1/neighbors/{profile_id}
pub async fn delete_neighbor(
    pool: web::Data<PgPool>,
    user: AuthUser,
    profile_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ProfileService::new((**pool).clone());
    service.delete(user.id, *profile_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
