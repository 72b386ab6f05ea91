mod common;

use url_outbox::domain::entities::{EventStatus, URL_CREATED, UrlCreatedPayload};
use url_outbox::domain::repositories::{EventRepository, UrlRepository};

#[tokio::test]
async fn test_fetch_next_pending_empty() {
    let store = common::memory_store().await;

    assert!(store.fetch_next_pending().await.unwrap().is_none());
    assert_eq!(store.pending_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_fetch_next_pending_returns_oldest() {
    let store = common::memory_store().await;
    store.save_url("https://a.com", "a").await.unwrap();
    store.save_url("https://b.com", "b").await.unwrap();

    let event = store.fetch_next_pending().await.unwrap().unwrap();

    assert_eq!(event.id, 1);
    assert_eq!(event.event_type, URL_CREATED);
    assert_eq!(event.status, EventStatus::New);
    assert!(event.created_at.is_some());

    let payload: UrlCreatedPayload = serde_json::from_str(&event.payload).unwrap();
    assert_eq!(payload, UrlCreatedPayload::new(1, "https://a.com", "a"));
}

#[tokio::test]
async fn test_fetch_does_not_consume_event() {
    let store = common::memory_store().await;
    store.save_url("https://a.com", "a").await.unwrap();

    let first = store.fetch_next_pending().await.unwrap().unwrap();
    let again = store.fetch_next_pending().await.unwrap().unwrap();

    assert_eq!(first, again);
}

#[tokio::test]
async fn test_mark_done_moves_to_next_event() {
    let store = common::memory_store().await;
    store.save_url("https://a.com", "a").await.unwrap();
    store.save_url("https://b.com", "b").await.unwrap();

    assert!(store.mark_done(1).await.unwrap());

    let next = store.fetch_next_pending().await.unwrap().unwrap();
    assert_eq!(next.id, 2);
    assert_eq!(store.pending_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_mark_done_only_once() {
    let store = common::memory_store().await;
    store.save_url("https://a.com", "a").await.unwrap();

    assert!(store.mark_done(1).await.unwrap());
    assert!(!store.mark_done(1).await.unwrap());

    let (_, _, status) = common::event_row(&store, 1).await;
    assert_eq!(status, "done");
}

#[tokio::test]
async fn test_mark_done_unknown_event() {
    let store = common::memory_store().await;

    assert!(!store.mark_done(42).await.unwrap());
}

#[tokio::test]
async fn test_status_column_rejects_unknown_values() {
    let store = common::memory_store().await;
    store.save_url("https://a.com", "a").await.unwrap();

    let result = sqlx::query("UPDATE events SET status = 'sent' WHERE id = 1")
        .execute(store.pool())
        .await;

    assert!(result.is_err());
}
