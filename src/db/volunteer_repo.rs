use crate::models::Volunteer;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

const VOLUNTEER_SELECT: &str = r#"
    SELECT v.id, v.name, v.phone, v.joined_at,
           COALESCE(ARRAY_AGG(ev.event_id) FILTER (WHERE ev.event_id IS NOT NULL), '{}') AS events
    FROM volunteers v
    LEFT JOIN event_volunteers ev ON ev.volunteer_id = v.id
"#;

/// All volunteers, most recently joined first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Volunteer>, sqlx::Error> {
    sqlx::query_as::<_, Volunteer>(&format!(
        "{VOLUNTEER_SELECT} GROUP BY v.id ORDER BY v.joined_at DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Top volunteers by number of associated events, descending.
pub async fn list_top(pool: &PgPool, limit: i64) -> Result<Vec<Volunteer>, sqlx::Error> {
    sqlx::query_as::<_, Volunteer>(&format!(
        "{VOLUNTEER_SELECT} GROUP BY v.id ORDER BY COUNT(ev.event_id) DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Find a volunteer by ID
pub async fn find_by_id(pool: &PgPool, volunteer_id: Uuid) -> Result<Option<Volunteer>, sqlx::Error> {
    sqlx::query_as::<_, Volunteer>(&format!("{VOLUNTEER_SELECT} WHERE v.id = $1 GROUP BY v.id"))
        .bind(volunteer_id)
        .fetch_optional(pool)
        .await
}

/// Serialize lookup-or-create on one (name, phone) identity for the
/// duration of the transaction. Without this, two concurrent joins
/// under READ COMMITTED both miss the lookup and both insert, since
/// the pair carries no uniqueness constraint. The lock key is derived
/// server-side so every connection contends on the same key.
pub async fn lock_identity(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    phone: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1 || ':' || $2)::bigint)")
        .bind(name)
        .bind(phone)
        .execute(tx.as_mut())
        .await?;

    Ok(())
}

/// Look up a volunteer by the exact (name, phone) pair, inside the
/// join-event transaction. There is no uniqueness constraint on the
/// pair; the first match wins.
pub async fn find_by_name_phone(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    phone: &str,
) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM volunteers WHERE name = $1 AND phone = $2 ORDER BY joined_at ASC LIMIT 1",
    )
    .bind(name)
    .bind(phone)
    .fetch_optional(tx.as_mut())
    .await?;

    Ok(row.map(|(id,)| id))
}

/// Insert a volunteer inside the join-event transaction.
pub async fn insert_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    phone: &str,
) -> Result<Uuid, sqlx::Error> {
    let (id,): (Uuid,) =
        sqlx::query_as("INSERT INTO volunteers (name, phone) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(phone)
            .fetch_one(tx.as_mut())
            .await?;

    Ok(id)
}

/// Associate a volunteer with an event. Already-associated pairs are a
/// no-op, which is what makes the join workflow idempotent.
pub async fn associate_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    volunteer_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO event_volunteers (event_id, volunteer_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(event_id)
    .bind(volunteer_id)
    .execute(tx.as_mut())
    .await?;

    Ok(())
}

/// Associate a volunteer with a set of events (volunteer create/update).
pub async fn associate_many(
    tx: &mut Transaction<'_, Postgres>,
    volunteer_id: Uuid,
    event_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO event_volunteers (event_id, volunteer_id)
        SELECT UNNEST($2::uuid[]), $1
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(volunteer_id)
    .bind(event_ids)
    .execute(tx.as_mut())
    .await?;

    Ok(())
}

/// Replace the full event set of a volunteer.
pub async fn replace_events(
    tx: &mut Transaction<'_, Postgres>,
    volunteer_id: Uuid,
    event_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM event_volunteers WHERE volunteer_id = $1")
        .bind(volunteer_id)
        .execute(tx.as_mut())
        .await?;

    associate_many(tx, volunteer_id, event_ids).await
}

/// Partial update of name/phone; unset fields are retained. Runs in the
/// same transaction as an events-set replacement.
pub async fn update_partial(
    tx: &mut Transaction<'_, Postgres>,
    volunteer_id: Uuid,
    name: Option<&str>,
    phone: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE volunteers
        SET name = COALESCE($2, name),
            phone = COALESCE($3, phone)
        WHERE id = $1
        "#,
    )
    .bind(volunteer_id)
    .bind(name)
    .bind(phone)
    .execute(tx.as_mut())
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a volunteer. Event associations cascade away.
pub async fn delete(pool: &PgPool, volunteer_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM volunteers WHERE id = $1")
        .bind(volunteer_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
