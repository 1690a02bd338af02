/// Auth handlers - signup, login, token refresh, logout, account deletion
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::services::AuthService;
use crate::validators;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Create a new user with an empty neighbor profile.
/// POST /api/v1/auth/signup
pub async fn signup(pool: web::Data<PgPool>, req: web::Json<SignupRequest>) -> Result<HttpResponse> {
    req.validate()?;
    if !validators::validate_username(&req.username) {
        return Err(AppError::Validation(
            "username may contain letters, digits, - and _ (3-32 characters)".to_string(),
        ));
    }

    let service = AuthService::new((**pool).clone());
    let user = service
        .signup(&req.username, req.email.as_deref(), &req.password)
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "message": "Signup successful! Profile created.",
    })))
}

/// Exchange credentials for an access/refresh token pair.
/// POST /api/v1/auth/token
pub async fn login(pool: web::Data<PgPool>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    req.validate()?;

    let service = AuthService::new((**pool).clone());
    let tokens = service.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
    }))
}

/// Exchange a refresh token for a new access token.
/// POST /api/v1/auth/token/refresh
pub async fn refresh_token(
    pool: web::Data<PgPool>,
    req: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone());
    let tokens = service.refresh(&req.refresh).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "access_token": tokens.access_token,
        "expires_in": tokens.expires_in,
    })))
}

/// Revoke the supplied refresh token.
/// POST /api/v1/auth/logout
pub async fn logout(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    req: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone());
    service.logout(&req.refresh).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out successfully",
    })))
}

/// Delete the caller's account; profile, posts and events cascade.
/// DELETE /api/v1/auth/me
pub async fn delete_account(pool: web::Data<PgPool>, user: AuthUser) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone());
    service.delete_account(user.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
