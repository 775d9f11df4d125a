#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use gallery_server::data::image_repository::{ImageRepository, SqliteImageRepository};
use gallery_server::domain::image::Image;
use gallery_server::domain::post::Post;
use gallery_server::infrastructure::config::AppConfig;
use gallery_server::infrastructure::database::{create_memory_pool, run_migrations};
use gallery_server::server::AppState;
use sqlx::SqlitePool;

pub const IMAGE_BASE_URL: &str = "http://images.test/";
pub const JWT_SECRET: &str = "test-secret";

pub fn test_config(admin_password_hash: Option<String>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        jwt_secret: JWT_SECRET.into(),
        admin_password_hash,
        image_base_url: IMAGE_BASE_URL.into(),
        video_url: None,
        cors_origins: vec![],
    }
}

pub async fn empty_pool() -> SqlitePool {
    let pool = create_memory_pool().await.expect("open in-memory sqlite");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

pub async fn seed_images(pool: &SqlitePool, ids: &[&str]) {
    let repo = SqliteImageRepository::new(pool.clone());
    for id in ids {
        repo.save(Image::new(id.to_string(), None, None))
            .await
            .expect("seed image");
    }
}

/// A database holding one image (`image_id`) and one post (`post_id`) of it.
pub struct PostFixture {
    pub pool: SqlitePool,
    pub state: AppState,
    pub post_id: String,
    pub post: Post,
}

pub async fn post_fixture() -> PostFixture {
    post_fixture_with_admin(None).await
}

pub async fn post_fixture_with_admin(admin_password_hash: Option<String>) -> PostFixture {
    let pool = empty_pool().await;
    seed_images(&pool, &["image_id"]).await;

    let state = AppState::new(test_config(admin_password_hash), pool.clone());
    let post_id = "post_id".to_string();
    let created_at = Utc.with_ymd_and_hms(2017, 7, 4, 12, 30, 0).unwrap();
    let post = state
        .post_service
        .create(post_id.clone(), "image_id".into(), created_at)
        .await
        .expect("create fixture post");

    PostFixture {
        pool,
        state,
        post_id,
        post,
    }
}
