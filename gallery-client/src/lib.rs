use async_trait::async_trait;
use chrono::{DateTime, Utc};

mod error;
mod http_client;
mod models;

pub use error::GalleryClientError;
pub use http_client::GalleryClientHttp;
pub use models::{Image, Neighbors, Post};

#[async_trait(?Send)]
pub trait GalleryClient {
    async fn login(&mut self, password: String) -> Result<(), GalleryClientError>;
    async fn get_post(&self, id: &str) -> Result<Post, GalleryClientError>;
    async fn list_posts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Post>, GalleryClientError>;
    async fn create_post(
        &self,
        id: String,
        image_id: String,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Post, GalleryClientError>;
    async fn delete_post(&self, id: &str) -> Result<(), GalleryClientError>;
    async fn get_image(&self, id: &str) -> Result<Image, GalleryClientError>;
    async fn latest_image(&self) -> Result<Image, GalleryClientError>;
    async fn random_image(&self) -> Result<Image, GalleryClientError>;
    async fn neighbors(&self, id: &str) -> Result<Neighbors, GalleryClientError>;
    async fn list_images(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Image>, GalleryClientError>;
    async fn create_image(
        &self,
        id: String,
        caption: Option<String>,
        location: Option<String>,
    ) -> Result<Image, GalleryClientError>;
}
