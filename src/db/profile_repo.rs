use crate::models::NeighborProfile;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Optional fields for profile updates. Unset fields keep their prior
/// values (COALESCE in the query).
#[derive(Debug, Default)]
pub struct UpdateProfileFields {
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

/// Create a profile with explicit field values.
pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    house_number: &str,
    street: &str,
    postal_code: Option<&str>,
    phone: &str,
    bio: Option<&str>,
) -> Result<NeighborProfile, sqlx::Error> {
    let profile = sqlx::query_as::<_, NeighborProfile>(
        r#"
        INSERT INTO neighbor_profiles (user_id, house_number, street, postal_code, phone, bio)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id,
                  (SELECT username FROM users WHERE id = $1) AS username,
                  house_number, street, postal_code, phone, bio
        "#,
    )
    .bind(user_id)
    .bind(house_number)
    .bind(street)
    .bind(postal_code)
    .bind(phone)
    .bind(bio)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

/// Create the empty profile that signup attaches to every new user.
/// Runs inside the signup transaction.
pub async fn create_empty(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO neighbor_profiles (user_id, house_number, street, phone, bio)
        VALUES ($1, '', '', '', '')
        "#,
    )
    .bind(user_id)
    .execute(tx.as_mut())
    .await?;

    Ok(())
}

/// Find a profile by its id.
pub async fn find_by_id(pool: &PgPool, profile_id: Uuid) -> Result<Option<NeighborProfile>, sqlx::Error> {
    sqlx::query_as::<_, NeighborProfile>(
        r#"
        SELECT p.id, p.user_id, u.username, p.house_number, p.street, p.postal_code, p.phone, p.bio
        FROM neighbor_profiles p
        JOIN users u ON u.id = p.user_id
        WHERE p.id = $1
        "#,
    )
    .bind(profile_id)
    .fetch_optional(pool)
    .await
}

/// Find the profile belonging to a user.
pub async fn find_by_user_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<NeighborProfile>, sqlx::Error> {
    sqlx::query_as::<_, NeighborProfile>(
        r#"
        SELECT p.id, p.user_id, u.username, p.house_number, p.street, p.postal_code, p.phone, p.bio
        FROM neighbor_profiles p
        JOIN users u ON u.id = p.user_id
        WHERE p.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// All profiles sharing a postal code, excluding one profile (the
/// caller's own). Profiles without a postal code never match.
pub async fn list_by_postal_code_excluding(
    pool: &PgPool,
    postal_code: &str,
    exclude_profile_id: Uuid,
) -> Result<Vec<NeighborProfile>, sqlx::Error> {
    sqlx::query_as::<_, NeighborProfile>(
        r#"
        SELECT p.id, p.user_id, u.username, p.house_number, p.street, p.postal_code, p.phone, p.bio
        FROM neighbor_profiles p
        JOIN users u ON u.id = p.user_id
        WHERE p.postal_code = $1 AND p.id <> $2
        ORDER BY u.username
        "#,
    )
    .bind(postal_code)
    .bind(exclude_profile_id)
    .fetch_all(pool)
    .await
}

/// Partial update: supplied fields replace, unset fields are retained.
pub async fn update_partial(
    pool: &PgPool,
    profile_id: Uuid,
    fields: &UpdateProfileFields,
) -> Result<Option<NeighborProfile>, sqlx::Error> {
    sqlx::query_as::<_, NeighborProfile>(
        r#"
        UPDATE neighbor_profiles p
        SET house_number = COALESCE($2, house_number),
            street = COALESCE($3, street),
            postal_code = COALESCE($4, postal_code),
            phone = COALESCE($5, phone),
            bio = COALESCE($6, bio),
            updated_at = NOW()
        FROM users u
        WHERE p.id = $1 AND u.id = p.user_id
        RETURNING p.id, p.user_id, u.username, p.house_number, p.street,
                  p.postal_code, p.phone, p.bio
        "#,
    )
    .bind(profile_id)
    .bind(fields.house_number.as_deref())
    .bind(fields.street.as_deref())
    .bind(fields.postal_code.as_deref())
    .bind(fields.phone.as_deref())
    .bind(fields.bio.as_deref())
    .fetch_optional(pool)
    .await
}

/// Delete a profile. Posts and events it created cascade away.
pub async fn delete(pool: &PgPool, profile_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM neighbor_profiles WHERE id = $1")
        .bind(profile_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
