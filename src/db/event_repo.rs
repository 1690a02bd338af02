use crate::models::{Event, EventVolunteer};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const EVENT_COLUMNS: &str = r#"
    e.id, e.profile_id, np.user_id AS created_by_user_id, u.username AS created_by,
    e.title, e.description, e.date, e.location
"#;

fn select_events(filter_and_order: &str) -> String {
    format!(
        r#"
        SELECT {EVENT_COLUMNS}
        FROM events e
        JOIN neighbor_profiles np ON np.id = e.profile_id
        JOIN users u ON u.id = np.user_id
        {filter_and_order}
        "#
    )
}

/// Volunteer row tagged with the event it belongs to, for grouping
/// nested volunteer lists over a batch of events.
#[derive(Debug, FromRow)]
pub struct EventVolunteerRow {
    pub event_id: Uuid,
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

/// Create an event. The creator profile is fixed here and never changes.
pub async fn create(
    pool: &PgPool,
    profile_id: Uuid,
    title: &str,
    description: &str,
    date: chrono::DateTime<chrono::Utc>,
    location: &str,
) -> Result<Event, sqlx::Error> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO events (profile_id, title, description, date, location)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(profile_id)
    .bind(title)
    .bind(description)
    .bind(date)
    .bind(location)
    .fetch_one(pool)
    .await?;

    sqlx::query_as::<_, Event>(&select_events("WHERE e.id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Find an event by ID
pub async fn find_by_id(pool: &PgPool, event_id: Uuid) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(&select_events("WHERE e.id = $1"))
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

/// All events, soonest date first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(&select_events("ORDER BY e.date ASC"))
        .fetch_all(pool)
        .await
}

/// Events created by one profile, soonest date first.
pub async fn list_by_profile(pool: &PgPool, profile_id: Uuid) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(&select_events("WHERE e.profile_id = $1 ORDER BY e.date ASC"))
        .bind(profile_id)
        .fetch_all(pool)
        .await
}

/// Events joined via the volunteer match: volunteers whose name equals
/// the username OR whose phone equals the profile phone, then the
/// distinct set of events any of those volunteers is associated with.
/// This is a heuristic string match, not a foreign-key join.
pub async fn list_joined(
    pool: &PgPool,
    username: &str,
    phone: &str,
) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(&format!(
        r#"
        SELECT DISTINCT {EVENT_COLUMNS}
        FROM events e
        JOIN neighbor_profiles np ON np.id = e.profile_id
        JOIN users u ON u.id = np.user_id
        JOIN event_volunteers ev ON ev.event_id = e.id
        JOIN volunteers v ON v.id = ev.volunteer_id
        WHERE v.name = $1 OR v.phone = $2
        ORDER BY e.date ASC
        "#
    ))
    .bind(username)
    .bind(phone)
    .fetch_all(pool)
    .await
}

/// Volunteers of a single event.
pub async fn volunteers_for_event(
    pool: &PgPool,
    event_id: Uuid,
) -> Result<Vec<EventVolunteer>, sqlx::Error> {
    sqlx::query_as::<_, EventVolunteer>(
        r#"
        SELECT v.id, v.name, v.phone
        FROM volunteers v
        JOIN event_volunteers ev ON ev.volunteer_id = v.id
        WHERE ev.event_id = $1
        ORDER BY v.joined_at ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
}

/// Volunteers for a batch of events in one query.
pub async fn volunteers_for_events(
    pool: &PgPool,
    event_ids: &[Uuid],
) -> Result<Vec<EventVolunteerRow>, sqlx::Error> {
    sqlx::query_as::<_, EventVolunteerRow>(
        r#"
        SELECT ev.event_id, v.id, v.name, v.phone
        FROM volunteers v
        JOIN event_volunteers ev ON ev.volunteer_id = v.id
        WHERE ev.event_id = ANY($1)
        ORDER BY v.joined_at ASC
        "#,
    )
    .bind(event_ids)
    .fetch_all(pool)
    .await
}

/// Count how many of the given event ids exist (validation of
/// caller-supplied event lists).
pub async fn count_existing(pool: &PgPool, event_ids: &[Uuid]) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM events WHERE id = ANY($1)")
            .bind(event_ids)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Partial update: supplied fields replace, unset fields are retained.
pub async fn update_partial(
    pool: &PgPool,
    event_id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    date: Option<chrono::DateTime<chrono::Utc>>,
    location: Option<&str>,
) -> Result<Option<Event>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE events
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            date = COALESCE($4, date),
            location = COALESCE($5, location)
        WHERE id = $1
        "#,
    )
    .bind(event_id)
    .bind(title)
    .bind(description)
    .bind(date)
    .bind(location)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_by_id(pool, event_id).await
}

/// Delete an event. Volunteer associations cascade away.
pub async fn delete(pool: &PgPool, event_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(event_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
