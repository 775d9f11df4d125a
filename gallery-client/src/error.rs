use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Endpoint cannot carry a path: {0}")]
    InvalidEndpoint(String),
    #[error("Token file error: {0}")]
    TokenFile(#[from] std::io::Error),
    #[error("Not found")]
    NotFound,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl GalleryClientError {
    pub async fn from_http_response(resp: Response) -> Self {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        match status {
            StatusCode::NOT_FOUND => GalleryClientError::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GalleryClientError::Unauthorized,
            StatusCode::CONFLICT => GalleryClientError::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                GalleryClientError::InvalidRequest(message)
            }
            other => GalleryClientError::Server {
                status: other.as_u16(),
                message,
            },
        }
    }
}
