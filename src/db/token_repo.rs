use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Record a revoked token by its jti. `expires_at` is the token's
/// natural expiry, after which the row is only dead weight and may be
/// cleaned up.
pub async fn revoke(
    pool: &PgPool,
    user_id: Uuid,
    jti: &str,
    token_type: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO revoked_tokens (user_id, jti, token_type, expires_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (jti) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(jti)
    .bind(token_type)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Check whether a token id has been revoked.
pub async fn is_revoked(pool: &PgPool, jti: &str) -> Result<bool, sqlx::Error> {
    let row: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)")
            .bind(jti)
            .fetch_one(pool)
            .await?;

    Ok(row.0)
}

/// Drop revocation rows whose tokens have expired anyway.
pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
