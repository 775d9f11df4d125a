use crate::application::auth_service::AuthService;
use crate::application::image_service::ImageService;
use crate::application::post_service::PostService;
use crate::data::image_repository::SqliteImageRepository;
use crate::data::post_repository::SqlitePostRepository;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::security::JwtKeys;
use crate::presentation::handlers::{self, AppImageService, AppPostService};
use crate::presentation::middleware::{AdminAuthMiddleware, RequestIdMiddleware, TimingMiddleware};
use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

/// Everything the handlers pull out of `app_data`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub post_service: AppPostService,
    pub image_service: AppImageService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        let image_repo = Arc::new(SqliteImageRepository::new(pool.clone()));
        let post_repo = Arc::new(SqlitePostRepository::new(pool));

        let image_service = ImageService::new(Arc::clone(&image_repo));
        let post_service = PostService::new(post_repo, image_repo);
        let auth_service = AuthService::new(
            config.admin_password_hash.clone(),
            JwtKeys::new(config.jwt_secret.clone()),
        );

        Self {
            config,
            post_service,
            image_service,
            auth_service,
        }
    }

    /// Registers shared state and every route; used by the server and by tests.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.post_service.clone()))
            .app_data(web::Data::new(self.image_service.clone()))
            .app_data(web::Data::new(self.auth_service.clone()));
        routes(cfg);
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .service(handlers::auth::scope())
            .service(handlers::post::get_posts)
            .service(handlers::post::get_post)
            .service(handlers::image::get_images)
            .service(handlers::image::latest_image)
            .service(handlers::image::random_image)
            .service(handlers::image::get_image)
            .service(handlers::image::image_neighbors)
            .service(
                web::scope("/admin")
                    .wrap(AdminAuthMiddleware)
                    .service(handlers::post::create_post)
                    .service(handlers::post::delete_post)
                    .service(handlers::image::create_image),
            ),
    )
    .service(handlers::website::index)
    .service(handlers::website::img)
    .service(handlers::website::admin)
    .service(handlers::website::video);
}

pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let bind_address = (state.config.host.clone(), state.config.port);

    info!(
        host = %bind_address.0,
        port = bind_address.1,
        "HTTP server starting"
    );

    HttpServer::new(move || {
        let cors = build_cors(&state.config);

        App::new()
            .wrap(Logger::default())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .configure(|cfg| state.configure(cfg))
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
