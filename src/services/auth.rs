/// Auth service - signup, login, token refresh, logout, account deletion
use crate::db::{profile_repo, token_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::{jwt, password};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Token pair returned by login.
#[derive(Debug)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new user and attach an empty neighbor profile, both in
    /// one transaction. Duplicate usernames are a conflict and create
    /// nothing.
    pub async fn signup(
        &self,
        username: &str,
        email: Option<&str>,
        plain_password: &str,
    ) -> Result<User> {
        if user_repo::username_exists(&self.pool, username).await? {
            return Err(AppError::Conflict("username already exists".to_string()));
        }

        let password_hash = password::hash_password(plain_password)?;

        let mut tx = self.pool.begin().await?;
        let user = user_repo::insert(&mut tx, username, email, &password_hash).await?;
        profile_repo::create_empty(&mut tx, user.id).await?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    /// Verify credentials and issue an access/refresh token pair.
    pub async fn login(&self, username: &str, plain_password: &str) -> Result<IssuedTokens> {
        let user = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

        if !password::verify_password(plain_password, &user.password_hash)? {
            return Err(AppError::Unauthorized("invalid credentials".to_string()));
        }

        Ok(IssuedTokens {
            access_token: jwt::issue_access_token(user.id, &user.username)?,
            refresh_token: jwt::issue_refresh_token(user.id, &user.username)?,
            expires_in: jwt::ACCESS_TOKEN_TTL_SECS,
        })
    }

    /// Exchange a valid, non-revoked refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokens> {
        let claims = jwt::validate_token_of_type(refresh_token, jwt::TOKEN_TYPE_REFRESH)?;

        if token_repo::is_revoked(&self.pool, &claims.jti).await? {
            return Err(AppError::Unauthorized("token has been revoked".to_string()));
        }

        let user_id = claims.user_id()?;
        Ok(IssuedTokens {
            access_token: jwt::issue_access_token(user_id, &claims.username)?,
            refresh_token: refresh_token.to_string(),
            expires_in: jwt::ACCESS_TOKEN_TTL_SECS,
        })
    }

    /// Revoke the supplied refresh token. A malformed or expired token is
    /// a validation failure, never a silent success.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        let claims = jwt::validate_token_of_type(refresh_token, jwt::TOKEN_TYPE_REFRESH)
            .map_err(|_| AppError::Validation("invalid refresh token".to_string()))?;

        let user_id = claims
            .user_id()
            .map_err(|_| AppError::Validation("invalid refresh token".to_string()))?;

        let expires_at: DateTime<Utc> = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AppError::Validation("invalid refresh token".to_string()))?;

        token_repo::revoke(
            &self.pool,
            user_id,
            &claims.jti,
            jwt::TOKEN_TYPE_REFRESH,
            expires_at,
        )
        .await?;

        tracing::info!(%user_id, "refresh token revoked");
        Ok(())
    }

    /// Delete the caller's account. The profile and everything it
    /// created cascade away with the user row.
    pub async fn delete_account(&self, actor: Uuid) -> Result<()> {
        if !user_repo::delete(&self.pool, actor).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        tracing::info!(user_id = %actor, "account deleted");
        Ok(())
    }
}
