use crate::domain::error::DomainError;
use crate::presentation::dto::{CreatePostRequest, ListPostsResponse, PageQuery};
use crate::presentation::handlers::AppPostService;
use crate::presentation::utils::{AdminUser, request_id};
use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use chrono::Utc;
use tracing::info;

#[post("/posts")]
pub async fn create_post(
    req: HttpRequest,
    admin: AdminUser,
    posts: web::Data<AppPostService>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let CreatePostRequest {
        id,
        image_id,
        created_at,
    } = payload.into_inner();
    let post = posts
        .create(id, image_id, created_at.unwrap_or_else(Utc::now))
        .await?;

    info!(
        request_id = %request_id(&req),
        subject = %admin.claims.sub,
        post_id = %post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(post))
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    req: HttpRequest,
    admin: AdminUser,
    posts: web::Data<AppPostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    posts.delete(&post_id).await?;

    info!(
        request_id = %request_id(&req),
        subject = %admin.claims.sub,
        post_id = %post_id,
        "post deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}

#[get("/posts/{id}")]
pub async fn get_post(
    posts: web::Data<AppPostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[get("/posts")]
pub async fn get_posts(
    req: HttpRequest,
    posts: web::Data<AppPostService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let PageQuery { limit, offset } = query.into_inner();
    let posts = posts.list(limit, offset).await?;

    info!(
        request_id = %request_id(&req),
        count = posts.len(),
        "posts retrieved"
    );

    Ok(HttpResponse::Ok().json(ListPostsResponse {
        total: posts.len(),
        posts,
        limit,
        offset,
    }))
}
