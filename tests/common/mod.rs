#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use url_outbox::application::services::UrlService;
use url_outbox::domain::entities::OutboxEvent;
use url_outbox::domain::event_sender::{DeliveryError, EventSender};
use url_outbox::infrastructure::persistence::SqliteStore;
use url_outbox::state::AppState;

pub async fn memory_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::initialize("sqlite::memory:").await.unwrap())
}

pub fn create_test_state(store: Arc<SqliteStore>) -> AppState {
    let url_service = Arc::new(UrlService::new(store.clone(), 6));
    AppState::new(url_service, store)
}

pub async fn count_urls(store: &SqliteStore, alias: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url WHERE alias = ?")
        .bind(alias)
        .fetch_one(store.pool())
        .await
        .unwrap()
}

pub async fn count_all_urls(store: &SqliteStore) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(store.pool())
        .await
        .unwrap()
}

pub async fn count_events(store: &SqliteStore) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(store.pool())
        .await
        .unwrap()
}

/// Returns `(event_type, payload, status)` for the event with `id`.
pub async fn event_row(store: &SqliteStore, id: i64) -> (String, String, String) {
    sqlx::query_as("SELECT event_type, payload, status FROM events WHERE id = ?")
        .bind(id)
        .fetch_one(store.pool())
        .await
        .unwrap()
}

pub async fn event_statuses(store: &SqliteStore) -> Vec<(i64, String)> {
    sqlx::query_as("SELECT id, status FROM events ORDER BY id")
        .fetch_all(store.pool())
        .await
        .unwrap()
}

/// Makes every subsequent event insert fail inside the database.
pub async fn break_event_inserts(store: &SqliteStore) {
    sqlx::query(
        r#"
        CREATE TRIGGER reject_events BEFORE INSERT ON events
        BEGIN
            SELECT RAISE(ABORT, 'event inserts disabled');
        END
        "#,
    )
    .execute(store.pool())
    .await
    .unwrap();
}

/// Sender that records the ids it was handed.
#[derive(Default)]
pub struct RecordingSender {
    delivered: Mutex<Vec<i64>>,
}

impl RecordingSender {
    pub fn delivered(&self) -> Vec<i64> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSender for RecordingSender {
    async fn send(&self, event: &OutboxEvent) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(event.id);
        Ok(())
    }
}

/// Sender that rejects every event.
pub struct RejectingSender;

#[async_trait]
impl EventSender for RejectingSender {
    async fn send(&self, event: &OutboxEvent) -> Result<(), DeliveryError> {
        Err(DeliveryError {
            event_id: event.id,
            reason: "sink offline".to_string(),
        })
    }
}
