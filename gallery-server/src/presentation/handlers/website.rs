use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::image::Image;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers::AppImageService;
use crate::presentation::utils::{admin_path, decode_image_id, image_path, request_id};
use crate::presentation::views::{self, AdminPage, ImagePage};
use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, ResponseError, get, web};
use tracing::error;

/// Plain-text failures for browser-facing pages.
#[derive(Debug)]
pub enum PageError {
    InvalidImageId,
    NotFound,
    Fetch(&'static str),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::InvalidImageId => f.write_str("invalid image id"),
            PageError::NotFound => f.write_str("not found"),
            PageError::Fetch(what) => write!(f, "error fetching {}", what),
        }
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            PageError::InvalidImageId => StatusCode::BAD_REQUEST,
            PageError::NotFound => StatusCode::NOT_FOUND,
            PageError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}

fn fetch_error(req: &HttpRequest, what: &'static str) -> impl FnOnce(DomainError) -> PageError {
    let rid = request_id(req);
    move |err| match err {
        DomainError::ImageNotFound(_) | DomainError::NoImages => PageError::NotFound,
        other => {
            error!(request_id = %rid, "error fetching {}: {}", what, other);
            PageError::Fetch(what)
        }
    }
}

async fn load_image(
    req: &HttpRequest,
    images: &AppImageService,
    encoded: &str,
) -> Result<Image, PageError> {
    let id = decode_image_id(encoded).map_err(|_| PageError::InvalidImageId)?;
    images
        .get_image(&id)
        .await
        .map_err(fetch_error(req, "image"))
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

#[get("/")]
pub async fn index(
    req: HttpRequest,
    images: web::Data<AppImageService>,
) -> Result<HttpResponse, PageError> {
    let image = images
        .random_image()
        .await
        .map_err(fetch_error(&req, "image"))?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, image_path(&image.id)))
        .finish())
}

#[get("/img/{id}")]
pub async fn img(
    req: HttpRequest,
    images: web::Data<AppImageService>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, PageError> {
    let image = load_image(&req, &images, &path.into_inner()).await?;
    let next = images
        .random_image()
        .await
        .map_err(fetch_error(&req, "next image"))?;

    let page = ImagePage::new(&image, &config.image_base_url, Some(image_path(&next.id)));
    Ok(html(views::render_image_page(&page)))
}

#[get("/admin/{id}")]
pub async fn admin(
    req: HttpRequest,
    images: web::Data<AppImageService>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, PageError> {
    let image = load_image(&req, &images, &path.into_inner()).await?;
    let (previous, next) = images
        .neighbors(&image.id)
        .await
        .map_err(fetch_error(&req, "previous and next images"))?;

    let page = AdminPage {
        image: ImagePage::new(&image, &config.image_base_url, None),
        previous_path: previous.map(|p| admin_path(&p.id)),
        next_path: next.map(|n| admin_path(&n.id)),
    };
    Ok(html(views::render_admin_page(&page)))
}

#[get("/video")]
pub async fn video(config: web::Data<AppConfig>) -> HttpResponse {
    html(views::render_video_page(config.video_url.as_deref()))
}
