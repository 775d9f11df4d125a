use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, error::ErrorUnauthorized};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use futures_util::future::{Ready, ready};

use crate::domain::error::DomainError;
use crate::infrastructure::security::Claims;
use crate::presentation::middleware::RequestId;

/// Set by the admin auth middleware once the bearer token checks out.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub claims: Claims,
}

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AdminUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(ErrorUnauthorized("missing authenticated admin"))),
        }
    }
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}

pub fn encode_image_id(image_id: &str) -> String {
    URL_SAFE.encode(image_id.as_bytes())
}

/// Accepts the URL-safe alphabet and, for links minted before the switch,
/// the standard one.
pub fn decode_image_id(encoded: &str) -> Result<String, DomainError> {
    let bytes = URL_SAFE
        .decode(encoded)
        .or_else(|_| STANDARD.decode(encoded))
        .map_err(|_| DomainError::InvalidImageId(encoded.to_string()))?;
    String::from_utf8(bytes).map_err(|_| DomainError::InvalidImageId(encoded.to_string()))
}

pub fn image_path(image_id: &str) -> String {
    format!("/img/{}", encode_image_id(image_id))
}

pub fn admin_path(image_id: &str) -> String {
    format!("/admin/{}", encode_image_id(image_id))
}
