use crate::domain::error::DomainError;
use crate::domain::post::Post;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{error, info};

pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const MAX_PAGE_LIMIT: usize = 100;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    async fn get_posts(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, DomainError>;
}

#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// SQLite binds integers as i64; offsets beyond that range clamp to
/// `i64::MAX`, which still selects an empty page.
pub(crate) fn page_bounds(limit: Option<usize>, offset: Option<usize>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT) as i64;
    let offset = offset.map_or(0, |o| i64::try_from(o).unwrap_or(i64::MAX));
    (limit, offset)
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, image_id, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&post.id)
        .bind(&post.image_id)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false)
            {
                DomainError::PostAlreadyExists(post.id.clone())
            } else if e
                .as_database_error()
                .map(|db| db.is_foreign_key_violation())
                .unwrap_or(false)
            {
                DomainError::ImageNotFound(post.image_id.clone())
            } else {
                error!("failed to create post: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(post_id = %post.id, image_id = %post.image_id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, image_id, created_at
            FROM posts WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id.to_string()));
        }

        info!(post_id = %id, "post deleted");
        Ok(())
    }

    async fn get_posts(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, DomainError> {
        let (limit, offset) = page_bounds(limit, offset);

        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, image_id, created_at
            FROM posts
            ORDER BY created_at DESC, id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::Internal(e.to_string())
        })
    }
}
