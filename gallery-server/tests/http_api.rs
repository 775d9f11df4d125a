mod common;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test};
use common::{post_fixture, post_fixture_with_admin};
use gallery_server::infrastructure::security::hash_password;
use gallery_server::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use serde_json::{Value, json};

const PASSWORD: &str = "s3cret-admin";

#[actix_web::test]
async fn health_reports_ok() {
    let fx = post_fixture().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.configure(cfg))).await;

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/health").to_request())
            .await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn get_post_returns_fixture() {
    let fx = post_fixture().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", fx.post_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], "post_id");
    assert_eq!(body["image_id"], "image_id");
}

#[actix_web::test]
async fn missing_post_is_404_with_error_body() {
    let fx = post_fixture().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.configure(cfg))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/posts/ghost").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "post not found: ghost");
    assert_eq!(body["details"]["resource"], "ghost");
}

#[actix_web::test]
async fn lists_posts_with_paging_metadata() {
    let fx = post_fixture().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/posts?limit=5&offset=0")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["posts"][0]["id"], "post_id");
}

#[actix_web::test]
async fn image_endpoints_serve_store() {
    let fx = post_fixture().await;
    common::seed_images(&fx.pool, &["zz_last.jpg"]).await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.configure(cfg))).await;

    let latest: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/images/latest").to_request(),
    )
    .await;
    assert_eq!(latest["id"], "zz_last.jpg");

    let image: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/images/image_id").to_request(),
    )
    .await;
    assert_eq!(image["id"], "image_id");
    assert_eq!(image["caption"], Value::Null);

    let neighbors: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/images/image_id/neighbors")
            .to_request(),
    )
    .await;
    assert_eq!(neighbors["previous"], Value::Null);
    assert_eq!(neighbors["next"]["id"], "zz_last.jpg");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/images/nope.jpg").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admin_routes_require_token() {
    let fx = post_fixture().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.configure(cfg))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/posts")
            .set_json(json!({ "id": "p2", "image_id": "image_id" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/posts")
            .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
            .set_json(json!({ "id": "p2", "image_id": "image_id" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn login_is_rejected_without_configured_password() {
    let fx = post_fixture().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.configure(cfg))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "password": "anything" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn admin_can_create_images_and_posts() {
    let hash = hash_password(PASSWORD).unwrap();
    let fx = post_fixture_with_admin(Some(hash)).await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.configure(cfg))).await;

    let wrong = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let login: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(login["token_type"], "Bearer");
    let bearer = format!("Bearer {}", login["access_token"].as_str().unwrap());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/images")
            .insert_header((AUTHORIZATION, bearer.as_str()))
            .set_json(json!({ "id": "20040901_001.jpg", "caption": "hello", "location": "NYC" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/posts")
            .insert_header((AUTHORIZATION, bearer.as_str()))
            .set_json(json!({
                "id": "post_id2",
                "image_id": "20040901_001.jpg",
                "created_at": "2020-01-02T03:04:05Z"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["id"], "post_id2");

    let duplicate = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/posts")
            .insert_header((AUTHORIZATION, bearer.as_str()))
            .set_json(json!({ "id": "post_id2", "image_id": "20040901_001.jpg" }))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/admin/posts/post_id2")
            .insert_header((AUTHORIZATION, bearer.as_str()))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn middleware_sets_tracing_headers() {
    let fx = post_fixture().await;
    let app = test::init_service(
        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .configure(|cfg| fx.state.configure(cfg)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/health")
            .insert_header(("x-request-id", "req-42"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-42");
    let timing = resp.headers().get("server-timing").unwrap().to_str().unwrap();
    assert!(timing.starts_with("app;dur="));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;
    assert!(resp.headers().contains_key("x-request-id"));
}
