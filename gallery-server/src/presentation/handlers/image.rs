use crate::domain::error::DomainError;
use crate::domain::image::Image;
use crate::presentation::dto::{
    CreateImageRequest, ListImagesResponse, NeighborsResponse, PageQuery,
};
use crate::presentation::handlers::AppImageService;
use crate::presentation::utils::{AdminUser, request_id};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

#[post("/images")]
pub async fn create_image(
    req: HttpRequest,
    admin: AdminUser,
    images: web::Data<AppImageService>,
    payload: web::Json<CreateImageRequest>,
) -> Result<HttpResponse, DomainError> {
    let image = images.save_image(Image::from(payload.into_inner())).await?;

    info!(
        request_id = %request_id(&req),
        subject = %admin.claims.sub,
        image_id = %image.id,
        "image created"
    );

    Ok(HttpResponse::Created().json(image))
}

#[get("/images")]
pub async fn get_images(
    images: web::Data<AppImageService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let PageQuery { limit, offset } = query.into_inner();
    let images = images.list_images(limit, offset).await?;
    Ok(HttpResponse::Ok().json(ListImagesResponse {
        total: images.len(),
        images,
        limit,
        offset,
    }))
}

// registered before `/images/{id}` so the literal segments win
#[get("/images/latest")]
pub async fn latest_image(
    images: web::Data<AppImageService>,
) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse::Ok().json(images.latest_image().await?))
}

#[get("/images/random")]
pub async fn random_image(
    images: web::Data<AppImageService>,
) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse::Ok().json(images.random_image().await?))
}

#[get("/images/{id}")]
pub async fn get_image(
    images: web::Data<AppImageService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse::Ok().json(images.get_image(&path.into_inner()).await?))
}

#[get("/images/{id}/neighbors")]
pub async fn image_neighbors(
    images: web::Data<AppImageService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    let image = images.get_image(&id).await?;
    let (previous, next) = images.neighbors(&image.id).await?;
    Ok(HttpResponse::Ok().json(NeighborsResponse { previous, next }))
}
