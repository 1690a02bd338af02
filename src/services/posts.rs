/// Post service - ownership-scoped CRUD over posts
use crate::db::{post_repo, profile_repo};
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::security::ownership::ensure_can_modify;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>> {
        Ok(post_repo::list_all(&self.pool).await?)
    }

    /// Create a post with the caller's profile as creator.
    pub async fn create(
        &self,
        actor: Uuid,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let profile = profile_repo::find_by_user_id(&self.pool, actor)
            .await?
            .ok_or_else(|| AppError::NotFound("neighbor profile not found".to_string()))?;

        let post = post_repo::create(&self.pool, profile.id, title, content, image_url).await?;

        tracing::info!(post_id = %post.id, profile_id = %profile.id, "post created");
        Ok(post)
    }

    pub async fn get(&self, post_id: Uuid) -> Result<Post> {
        post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))
    }

    /// Partial update, owner only. The guard runs before the write, so a
    /// rejected attempt leaves the post unchanged.
    pub async fn update(
        &self,
        actor: Uuid,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Post> {
        let post = self.get(post_id).await?;
        ensure_can_modify(actor, &post)?;

        post_repo::update_partial(&self.pool, post_id, title, content, image_url)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))
    }

    /// Delete, owner only.
    pub async fn delete(&self, actor: Uuid, post_id: Uuid) -> Result<()> {
        let post = self.get(post_id).await?;
        ensure_can_modify(actor, &post)?;

        post_repo::delete(&self.pool, post_id).await?;
        tracing::info!(%post_id, "post deleted");
        Ok(())
    }
}
