mod common;

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{App, test};
use common::{IMAGE_BASE_URL, empty_pool, seed_images, test_config};
use gallery_server::data::image_repository::{ImageRepository, SqliteImageRepository};
use gallery_server::domain::image::Image;
use gallery_server::presentation::utils::{admin_path, image_path};
use gallery_server::server::AppState;

async fn state_with(ids: &[&str]) -> AppState {
    let pool = empty_pool().await;
    seed_images(&pool, ids).await;
    AppState::new(test_config(None), pool)
}

#[actix_web::test]
async fn index_redirects_to_random_image() {
    let state = state_with(&["1234"]).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp.headers().get(LOCATION).unwrap().to_str().unwrap();
    assert!(location.ends_with(&image_path("1234")));
}

#[actix_web::test]
async fn index_without_images_is_404() {
    let state = state_with(&[]).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn image_page_renders() {
    let pool = empty_pool().await;
    SqliteImageRepository::new(pool.clone())
        .save(Image::new(
            "20040901_001.jpg".into(),
            Some("hello".into()),
            Some("NYC".into()),
        ))
        .await
        .unwrap();
    let state = AppState::new(test_config(None), pool);
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri(&image_path("20040901_001.jpg"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains(&format!("{}20040901_001.jpg", IMAGE_BASE_URL)));
    assert!(html.contains("hello"));
    assert!(html.contains("NYC"));
    assert!(html.contains("September 2004"));
    // only one image stored, so "next" points back at it
    assert!(html.contains(&image_path("20040901_001.jpg")));
}

#[actix_web::test]
async fn image_page_errors() {
    let state = state_with(&["1234"]).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri(&image_path("missing")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/img/@@@@").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"invalid image id");
}

#[actix_web::test]
async fn image_page_accepts_standard_base64_links() {
    // ">>>" encodes to "Pj4+" in the standard alphabet and "Pj4-" URL-safe
    let state = state_with(&[">>>"]).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    for uri in ["/img/Pj4+", "/img/Pj4-"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
    }
}

#[actix_web::test]
async fn admin_page_links_neighbors() {
    let state = state_with(&["20040901_001.jpg", "20040901_002.jpg", "20040901_003.jpg"]).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri(&admin_path("20040901_002.jpg"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains(&admin_path("20040901_001.jpg")));
    assert!(html.contains(&admin_path("20040901_003.jpg")));

    let req = test::TestRequest::get()
        .uri(&admin_path("20040901_001.jpg"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(!html.contains("class=\"previous\""));
    assert!(html.contains(&admin_path("20040901_002.jpg")));
}

#[actix_web::test]
async fn video_page_is_ok() {
    let state = state_with(&[]).await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/video").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
