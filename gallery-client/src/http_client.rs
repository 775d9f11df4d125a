use crate::GalleryClient;
use crate::error::GalleryClientError;
use crate::models::{Image, Neighbors, Post};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use url::Url;

const DEFAULT_TOKEN_FILE: &str = ".gallery_token";

#[derive(Clone)]
pub struct GalleryClientHttp {
    client: Arc<Client>,
    base_url: Url,
    token: Option<String>,
    token_file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
}

impl GalleryClientHttp {
    pub fn connect(endpoint: &str) -> Result<Self, GalleryClientError> {
        let base_url = Url::parse(endpoint)?;
        if base_url.cannot_be_a_base() {
            return Err(GalleryClientError::InvalidEndpoint(endpoint.to_string()));
        }
        Ok(Self {
            client: Arc::new(Client::builder().build()?),
            base_url,
            token: None,
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        })
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    pub fn set_token(&mut self, token: String) -> Result<(), GalleryClientError> {
        write_token_file(&self.token_file, &token)?;
        self.token = Some(token);
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Appends `segments` to the endpoint; each one is percent-encoded, so
    /// ids containing `/`, `?` or `#` stay inside their own segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn paged_url(&self, segments: &[&str], limit: Option<u32>, offset: Option<u32>) -> Url {
        let mut url = self.url(segments);
        url.set_query(Some(&page_query(limit, offset)));
        url
    }

    /// Token from memory, falling back to the token file from a previous login.
    fn stored_token(&self) -> Option<String> {
        match &self.token {
            Some(t) if !t.is_empty() => Some(t.clone()),
            _ => fs::read_to_string(&self.token_file)
                .ok()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match self.stored_token() {
            Some(token) => req.bearer_auth(token),
            None => {
                debug!("no admin token available, sending request unauthenticated");
                req
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, GalleryClientError> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(GalleryClientError::from_http_response(resp).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GalleryClientError> {
        let resp = self.client.get(url).send().await?;
        Self::read_json(resp).await
    }
}

/// Writes the bearer token readable by the owner only.
fn write_token_file(path: &Path, token: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // mode() only applies when the file is created
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(token.as_bytes())
}

fn page_query(limit: Option<u32>, offset: Option<u32>) -> String {
    let limit = limit.unwrap_or(10).min(100);
    let offset = offset.unwrap_or(0);
    format!("limit={}&offset={}", limit, offset)
}

#[async_trait(?Send)]
impl GalleryClient for GalleryClientHttp {
    async fn login(&mut self, password: String) -> Result<(), GalleryClientError> {
        let resp = self
            .client
            .post(self.url(&["api", "auth", "login"]))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;

        let auth: AuthResponse = Self::read_json(resp).await?;
        self.set_token(auth.access_token)
    }

    async fn get_post(&self, id: &str) -> Result<Post, GalleryClientError> {
        self.get_json(self.url(&["api", "posts", id])).await
    }

    async fn list_posts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Post>, GalleryClientError> {
        let posts: PostsResponse = self
            .get_json(self.paged_url(&["api", "posts"], limit, offset))
            .await?;
        Ok(posts.posts)
    }

    async fn create_post(
        &self,
        id: String,
        image_id: String,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Post, GalleryClientError> {
        let req = self.authorized(self.client.post(self.url(&["api", "admin", "posts"])));
        let resp = req
            .json(&serde_json::json!({
                "id": id,
                "image_id": image_id,
                "created_at": created_at,
            }))
            .send()
            .await?;
        Self::read_json(resp).await
    }

    async fn delete_post(&self, id: &str) -> Result<(), GalleryClientError> {
        let req = self.authorized(self.client.delete(self.url(&["api", "admin", "posts", id])));
        let resp = req.send().await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(GalleryClientError::from_http_response(resp).await)
        }
    }

    async fn get_image(&self, id: &str) -> Result<Image, GalleryClientError> {
        self.get_json(self.url(&["api", "images", id])).await
    }

    async fn latest_image(&self) -> Result<Image, GalleryClientError> {
        self.get_json(self.url(&["api", "images", "latest"]))
            .await
    }

    async fn random_image(&self) -> Result<Image, GalleryClientError> {
        self.get_json(self.url(&["api", "images", "random"]))
            .await
    }

    async fn neighbors(&self, id: &str) -> Result<Neighbors, GalleryClientError> {
        self.get_json(self.url(&["api", "images", id, "neighbors"]))
            .await
    }

    async fn list_images(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Image>, GalleryClientError> {
        let images: ImagesResponse = self
            .get_json(self.paged_url(&["api", "images"], limit, offset))
            .await?;
        Ok(images.images)
    }

    async fn create_image(
        &self,
        id: String,
        caption: Option<String>,
        location: Option<String>,
    ) -> Result<Image, GalleryClientError> {
        let req = self.authorized(self.client.post(self.url(&["api", "admin", "images"])));
        let resp = req
            .json(&serde_json::json!({
                "id": id,
                "caption": caption,
                "location": location,
            }))
            .send()
            .await?;
        Self::read_json(resp).await
    }
}
