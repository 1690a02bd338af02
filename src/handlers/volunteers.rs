/// Volunteer handlers - unrestricted CRUD and the join-event endpoint
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::services::VolunteerService;
use crate::validators;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct VolunteerListQuery {
    #[serde(default)]
    pub top: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVolunteerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 15))]
    pub phone: String,

    #[serde(default)]
    pub events: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVolunteerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 15))]
    pub phone: Option<String>,

    /// Replaces the whole event set when supplied
    pub events: Option<Vec<Uuid>>,
}

/// List volunteers; `?top=true` returns the ten busiest by event count.
/// GET /api/v1/volunteers
pub async fn list_volunteers(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    query: web::Query<VolunteerListQuery>,
) -> Result<HttpResponse> {
    let service = VolunteerService::new((**pool).clone());
    let volunteers = service.list(query.top).await?;

    Ok(HttpResponse::Ok().json(volunteers))
}

/// Create a volunteer. No ownership restriction applies.
/// POST /api/v1/volunteers
pub async fn create_volunteer(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    req: web::Json<CreateVolunteerRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    if !validators::validate_phone(&req.phone) {
        return Err(AppError::Validation("invalid phone number".to_string()));
    }

    let service = VolunteerService::new((**pool).clone());
    let volunteer = service.create(&req.name, &req.phone, &req.events).await?;

    Ok(HttpResponse::Created().json(volunteer))
}

/// Get a volunteer by ID.
/// GET /api/v1/volunteers/{volunteer_id}
pub async fn get_volunteer(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    volunteer_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = VolunteerService::new((**pool).clone());
    let volunteer = service.get(*volunteer_id).await?;

    Ok(HttpResponse::Ok().json(volunteer))
}

/// Partial update of a volunteer. No ownership restriction applies.
/// PUT /api/v1/volunteers/{volunteer_id}
pub async fn update_volunteer(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    volunteer_id: web::Path<Uuid>,
    req: web::Json<UpdateVolunteerRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    if let Some(phone) = req.phone.as_deref() {
        if !validators::validate_phone(phone) {
            return Err(AppError::Validation("invalid phone number".to_string()));
        }
    }

    let service = VolunteerService::new((**pool).clone());
    let volunteer = service
        .update(
            *volunteer_id,
            req.name.as_deref(),
            req.phone.as_deref(),
            req.events.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(volunteer))
}

/// Delete a volunteer. No ownership restriction applies.
/// DELETE /api/v1/volunteers/{volunteer_id}
pub async fn delete_volunteer(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    volunteer_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = VolunteerService::new((**pool).clone());
    service.delete(*volunteer_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Join an event as the acting identity. Idempotent: re-joining
/// succeeds without creating a duplicate association.
/// POST /api/v1/join-event/{event_id}
pub async fn join_event(
    pool: web::Data<PgPool>,
    user: AuthUser,
    event_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = VolunteerService::new((**pool).clone());
    let message = service.join_event(user.id, *event_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": message })))
}
