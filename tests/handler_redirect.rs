mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use url_outbox::api::handlers::redirect_handler;
use url_outbox::domain::repositories::UrlRepository;

#[tokio::test]
async fn test_redirect_success() {
    let store = common::memory_store().await;
    store
        .save_url("https://example.com/target", "go")
        .await
        .unwrap();

    let app = Router::new()
        .route("/{alias}", get(redirect_handler))
        .with_state(common::create_test_state(store));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/go").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let store = common::memory_store().await;
    let app = Router::new()
        .route("/{alias}", get(redirect_handler))
        .with_state(common::create_test_state(store));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/missing").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["alias"], "missing");
}

#[tokio::test]
async fn test_redirect_after_delete() {
    let store = common::memory_store().await;
    store.save_url("https://example.com", "gone").await.unwrap();
    store.delete_url("gone").await.unwrap();

    let app = Router::new()
        .route("/{alias}", get(redirect_handler))
        .with_state(common::create_test_state(store));
    let server = TestServer::new(app).unwrap();

    server.get("/gone").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_to_unsendable_url_is_internal_error() {
    let store = common::memory_store().await;
    store.save_url("https://a.com/a\nb", "nl").await.unwrap();

    let app = Router::new()
        .route("/{alias}", get(redirect_handler))
        .with_state(common::create_test_state(store));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/nl").await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.maybe_header("location").is_none());
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "internal_error"
    );
}
