use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("image not found: {0}")]
    ImageNotFound(String),
    #[error("image already exists: {0}")]
    ImageAlreadyExists(String),
    #[error("invalid image id: {0}")]
    InvalidImageId(String),
    #[error("no images available")]
    NoImages,
    #[error("post not found: {0}")]
    PostNotFound(String),
    #[error("post already exists: {0}")]
    PostAlreadyExists(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::ImageNotFound(_) | DomainError::PostNotFound(_) | DomainError::NoImages => {
                StatusCode::NOT_FOUND
            }
            DomainError::ImageAlreadyExists(_) | DomainError::PostAlreadyExists(_) => {
                StatusCode::CONFLICT
            }
            DomainError::InvalidImageId(_) | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // internal details stay in the logs
        let message = match self {
            DomainError::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        };
        let details = match self {
            DomainError::ImageNotFound(resource)
            | DomainError::PostNotFound(resource)
            | DomainError::ImageAlreadyExists(resource)
            | DomainError::PostAlreadyExists(resource) => Some(json!({ "resource": resource })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
