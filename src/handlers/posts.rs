/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    pub image_url: Option<String>,
}

/// List all posts, newest first.
/// GET /api/v1/posts
pub async fn list_posts(pool: web::Data<PgPool>, _user: AuthUser) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list().await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Create a post; the creator is the caller's profile.
/// POST /api/v1/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create(user.id, &req.title, &req.content, req.image_url.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID.
/// GET /api/v1/posts/{post_id}
pub async fn get_post(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.get(*post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Partial update of a post, owner only.
/// PUT /api/v1/posts/{post_id}
pub async fn update_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .update(
            user.id,
            *post_id,
            req.title.as_deref(),
            req.content.as_deref(),
            req.image_url.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post, owner only.
/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete(user.id, *post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fields absent from an update body must come out as None, which
    // is what makes the storage layer retain their prior values.
    #[test]
    fn absent_update_fields_deserialize_to_none() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{"title": "New title"}"#).unwrap();

        assert_eq!(req.title.as_deref(), Some("New title"));
        assert!(req.content.is_none());
        assert!(req.image_url.is_none());
    }

    #[test]
    fn empty_update_body_changes_nothing() {
        let req: UpdatePostRequest = serde_json::from_str("{}").unwrap();

        assert!(req.title.is_none());
        assert!(req.content.is_none());
        assert!(req.image_url.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn supplied_empty_title_fails_validation() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
