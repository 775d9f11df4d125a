use crate::domain::image::Image;
use crate::domain::post::Post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(rename = "token_type")]
    pub token_type: String, // "Bearer"
}

// ======================= POSTS =======================

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub id: String,
    pub image_id: String,
    /// Defaults to the time the request is handled.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ListPostsResponse {
    pub posts: Vec<Post>,
    pub total: usize,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// ======================= IMAGES =======================

#[derive(Debug, Deserialize)]
pub struct CreateImageRequest {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<CreateImageRequest> for Image {
    fn from(req: CreateImageRequest) -> Self {
        Image::new(
            req.id,
            req.caption.filter(|c| !c.is_empty()),
            req.location.filter(|l| !l.is_empty()),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ListImagesResponse {
    pub images: Vec<Image>,
    pub total: usize,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct NeighborsResponse {
    pub previous: Option<Image>,
    pub next: Option<Image>,
}

// ======================= Utils =======================

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
