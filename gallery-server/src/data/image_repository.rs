use crate::data::post_repository::page_bounds;
use crate::domain::error::DomainError;
use crate::domain::image::Image;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};
use tracing::{error, info};

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn save(&self, image: Image) -> Result<Image, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Image>, DomainError>;
    async fn latest(&self) -> Result<Option<Image>, DomainError>;
    async fn random(&self) -> Result<Option<Image>, DomainError>;
    /// Image with the greatest id strictly below `id`.
    async fn previous(&self, id: &str) -> Result<Option<Image>, DomainError>;
    /// Image with the smallest id strictly above `id`.
    async fn next(&self, id: &str) -> Result<Option<Image>, DomainError>;
    async fn get_images(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Image>, DomainError>;
}

#[derive(Clone)]
pub struct SqliteImageRepository {
    pool: SqlitePool,
}

impl SqliteImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_optional(
        &self,
        sql: &'static str,
        arg: Option<&str>,
    ) -> Result<Option<Image>, DomainError> {
        let mut query = sqlx::query_as::<Sqlite, Image>(sql);
        if let Some(arg) = arg {
            query = query.bind(arg);
        }
        query.fetch_optional(&self.pool).await.map_err(|e| {
            error!("db error while fetching image: {}", e);
            DomainError::Internal(e.to_string())
        })
    }
}

#[async_trait]
impl ImageRepository for SqliteImageRepository {
    async fn save(&self, image: Image) -> Result<Image, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO images (id, caption, location)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&image.id)
        .bind(&image.caption)
        .bind(&image.location)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false)
            {
                DomainError::ImageAlreadyExists(image.id.clone())
            } else {
                error!("failed to save image: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(image_id = %image.id, "image saved");
        Ok(image)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Image>, DomainError> {
        self.fetch_one_optional(
            "SELECT id, caption, location FROM images WHERE id = ?",
            Some(id),
        )
        .await
    }

    async fn latest(&self) -> Result<Option<Image>, DomainError> {
        self.fetch_one_optional(
            "SELECT id, caption, location FROM images ORDER BY id DESC LIMIT 1",
            None,
        )
        .await
    }

    async fn random(&self) -> Result<Option<Image>, DomainError> {
        self.fetch_one_optional(
            r#"
            SELECT id, caption, location FROM images
            WHERE id = (SELECT id FROM images ORDER BY RANDOM() LIMIT 1)
            "#,
            None,
        )
        .await
    }

    async fn previous(&self, id: &str) -> Result<Option<Image>, DomainError> {
        self.fetch_one_optional(
            "SELECT id, caption, location FROM images WHERE id < ? ORDER BY id DESC LIMIT 1",
            Some(id),
        )
        .await
    }

    async fn next(&self, id: &str) -> Result<Option<Image>, DomainError> {
        self.fetch_one_optional(
            "SELECT id, caption, location FROM images WHERE id > ? ORDER BY id LIMIT 1",
            Some(id),
        )
        .await
    }

    async fn get_images(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Image>, DomainError> {
        let (limit, offset) = page_bounds(limit, offset);

        sqlx::query_as::<_, Image>(
            r#"
            SELECT id, caption, location
            FROM images
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching images: {}", e);
            DomainError::Internal(e.to_string())
        })
    }
}
