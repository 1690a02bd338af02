/// Event handlers - HTTP endpoints for event operations
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::services::EventService;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, max = 255))]
    pub location: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
}

/// List all events with nested volunteers, soonest date first.
/// GET /api/v1/events
pub async fn list_events(pool: web::Data<PgPool>, _user: AuthUser) -> Result<HttpResponse> {
    let service = EventService::new((**pool).clone());
    let events = service.list().await?;

    Ok(HttpResponse::Ok().json(events))
}

/// Create an event; the creator is the caller's profile.
/// POST /api/v1/events
pub async fn create_event(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreateEventRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = EventService::new((**pool).clone());
    let event = service
        .create(user.id, &req.title, &req.description, req.date, &req.location)
        .await?;

    Ok(HttpResponse::Created().json(event))
}

/// Get an event by ID, including its nested volunteer list.
/// GET /api/v1/events/{event_id}
pub async fn get_event(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    event_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = EventService::new((**pool).clone());
    let event = service.get(*event_id).await?;

    Ok(HttpResponse::Ok().json(event))
}

/// Volunteers of one event.
/// GET /api/v1/events/{event_id}/volunteers
pub async fn get_event_volunteers(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    event_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = EventService::new((**pool).clone());
    let volunteers = service.volunteers(*event_id).await?;

    Ok(HttpResponse::Ok().json(volunteers))
}

/// Partial update of an event, owner only.
/// PUT /api/v1/events/{event_id}
pub async fn update_event(
    pool: web::Data<PgPool>,
    user: AuthUser,
    event_id: web::Path<Uuid>,
    req: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = EventService::new((**pool).clone());
    let event = service
        .update(
            user.id,
            *event_id,
            req.title.as_deref(),
            req.description.as_deref(),
            req.date,
            req.location.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(event))
}

/// Delete an event, owner only.
/// DELETE /api/v1/events/{event_id}
pub async fn delete_event(
    pool: web::Data<PgPool>,
    user: AuthUser,
    event_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = EventService::new((**pool).clone());
    service.delete(user.id, *event_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
