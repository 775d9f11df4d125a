use std::sync::Arc;

use crate::data::image_repository::ImageRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::{error::DomainError, post::Post};
use chrono::{DateTime, Utc};
use tracing::instrument;

pub struct PostService<R: PostRepository + 'static, I: ImageRepository + 'static> {
    repo: Arc<R>,
    images: Arc<I>,
}

impl<R, I> Clone for PostService<R, I>
where
    R: PostRepository + 'static,
    I: ImageRepository + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            images: Arc::clone(&self.images),
        }
    }
}

impl<R, I> PostService<R, I>
where
    R: PostRepository + 'static,
    I: ImageRepository + 'static,
{
    pub fn new(repo: Arc<R>, images: Arc<I>) -> Self {
        Self { repo, images }
    }

    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))
    }

    pub async fn list(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, DomainError> {
        self.repo.get_posts(limit, offset).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        id: String,
        image_id: String,
        created_at: DateTime<Utc>,
    ) -> Result<Post, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::Validation("post id must not be empty".into()));
        }
        if self.repo.find_by_id(&id).await?.is_some() {
            return Err(DomainError::PostAlreadyExists(id));
        }
        if self.images.find_by_id(&image_id).await?.is_none() {
            return Err(DomainError::ImageNotFound(image_id));
        }
        let post = Post::new(id, image_id, created_at);
        self.repo.create(post).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.repo.delete(id).await
    }
}
