use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str = r#"
    p.id, p.profile_id, np.user_id AS created_by_user_id, u.username AS created_by,
    p.title, p.content, p.image_url, p.created_at
"#;

fn select_posts(filter_and_order: &str) -> String {
    format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN neighbor_profiles np ON np.id = p.profile_id
        JOIN users u ON u.id = np.user_id
        {filter_and_order}
        "#
    )
}

/// Create a post. The creator profile is fixed here and never changes.
pub async fn create(
    pool: &PgPool,
    profile_id: Uuid,
    title: &str,
    content: &str,
    image_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO posts (profile_id, title, content, image_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(profile_id)
    .bind(title)
    .bind(content)
    .bind(image_url)
    .fetch_one(pool)
    .await?;

    sqlx::query_as::<_, Post>(&select_posts("WHERE p.id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Find a post by ID
pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&select_posts("WHERE p.id = $1"))
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// All posts, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&select_posts("ORDER BY p.created_at DESC"))
        .fetch_all(pool)
        .await
}

/// Posts created by one profile, newest first.
pub async fn list_by_profile(pool: &PgPool, profile_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&select_posts(
        "WHERE p.profile_id = $1 ORDER BY p.created_at DESC",
    ))
    .bind(profile_id)
    .fetch_all(pool)
    .await
}

/// Partial update: supplied fields replace, unset fields are retained.
/// `created_at` and the creator are immutable.
pub async fn update_partial(
    pool: &PgPool,
    post_id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
    image_url: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE($2, title),
            content = COALESCE($3, content),
            image_url = COALESCE($4, image_url)
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .bind(title)
    .bind(content)
    .bind(image_url)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_by_id(pool, post_id).await
}

/// Delete a post
pub async fn delete(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
