use std::sync::Arc;

use crate::data::image_repository::ImageRepository;
use crate::domain::{error::DomainError, image::Image};
use tracing::instrument;

pub struct ImageService<R: ImageRepository + 'static> {
    repo: Arc<R>,
}

impl<R: ImageRepository + 'static> Clone for ImageService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> ImageService<R>
where
    R: ImageRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_image(&self, id: &str) -> Result<Image, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ImageNotFound(id.to_string()))
    }

    pub async fn latest_image(&self) -> Result<Image, DomainError> {
        self.repo.latest().await?.ok_or(DomainError::NoImages)
    }

    pub async fn random_image(&self) -> Result<Image, DomainError> {
        self.repo.random().await?.ok_or(DomainError::NoImages)
    }

    /// Previous and next image by id. Either side is `None` at the ends.
    pub async fn neighbors(
        &self,
        id: &str,
    ) -> Result<(Option<Image>, Option<Image>), DomainError> {
        let previous = self.repo.previous(id).await?;
        let next = self.repo.next(id).await?;
        Ok((previous, next))
    }

    pub async fn list_images(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Image>, DomainError> {
        self.repo.get_images(limit, offset).await
    }

    #[instrument(skip(self))]
    pub async fn save_image(&self, image: Image) -> Result<Image, DomainError> {
        if image.id.trim().is_empty() {
            return Err(DomainError::Validation("image id must not be empty".into()));
        }
        if self.repo.find_by_id(&image.id).await?.is_some() {
            return Err(DomainError::ImageAlreadyExists(image.id));
        }
        self.repo.save(image).await
    }
}
