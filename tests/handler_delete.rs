mod common;

use axum::{Router, routing::delete};
use axum_test::TestServer;
use url_outbox::api::handlers::delete_handler;
use url_outbox::domain::repositories::UrlRepository;

#[tokio::test]
async fn test_delete_success() {
    let store = common::memory_store().await;
    store.save_url("https://example.com", "bye").await.unwrap();

    let app = Router::new()
        .route("/url/{alias}", delete(delete_handler))
        .with_state(common::create_test_state(store.clone()));
    let server = TestServer::new(app).unwrap();

    let response = server.delete("/url/bye").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "url deleted successfully");
    assert_eq!(common::count_urls(&store, "bye").await, 0);
}

#[tokio::test]
async fn test_delete_twice_returns_not_found() {
    let store = common::memory_store().await;
    store.save_url("https://example.com", "once").await.unwrap();

    let app = Router::new()
        .route("/url/{alias}", delete(delete_handler))
        .with_state(common::create_test_state(store));
    let server = TestServer::new(app).unwrap();

    server.delete("/url/once").await.assert_status_ok();

    let response = server.delete("/url/once").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_delete_unknown_alias() {
    let store = common::memory_store().await;
    let app = Router::new()
        .route("/url/{alias}", delete(delete_handler))
        .with_state(common::create_test_state(store));
    let server = TestServer::new(app).unwrap();

    server.delete("/url/nothing").await.assert_status_not_found();
}
