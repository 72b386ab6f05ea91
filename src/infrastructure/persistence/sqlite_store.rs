//! SQLite implementation of the URL and event repositories.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

use crate::domain::entities::{EventStatus, OutboxEvent, URL_CREATED, UrlCreatedPayload};
use crate::domain::repositories::{EventRepository, UrlRepository};
use crate::error::StoreError;
use crate::utils::db_error::is_unique_violation_on_alias;

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Upper bound on pooled connections. In-memory databases always use one.
    pub max_connections: u32,
    /// How long to wait for a free connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Store owning the `url` and `events` tables.
///
/// A single instance is shared (behind an `Arc`) by the HTTP handlers and the
/// event poller. Writers are serialized by SQLite's own locking; every public
/// operation opens and finishes its transaction within the call.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct EventRow {
    id: i64,
    event_type: String,
    payload: String,
    status: String,
    created_at: Option<NaiveDateTime>,
}

impl TryFrom<EventRow> for OutboxEvent {
    type Error = String;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(OutboxEvent {
            id: row.id,
            event_type: row.event_type,
            payload: row.payload,
            status: row.status.parse::<EventStatus>()?,
            created_at: row.created_at,
        })
    }
}

impl SqliteStore {
    /// Opens the database at `database_url` with default pool settings and
    /// applies the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the database cannot be opened or
    /// the schema cannot be created.
    pub async fn initialize(database_url: &str) -> Result<Self, StoreError> {
        Self::connect(database_url, PoolSettings::default()).await
    }

    /// Opens the database at `database_url` and applies the schema.
    ///
    /// The database file (and its parent directory) is created if missing.
    ///
    /// # Errors
    ///
    /// See [`Self::initialize`].
    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self, StoreError> {
        const OP: &str = "store.sqlite.connect";

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::storage(OP, e))?
            .create_if_missing(true);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(settings.acquire_timeout);

        // Each connection to an in-memory database gets its own database,
        // so the pool must keep exactly one connection alive.
        let pool_options = if is_in_memory(database_url) {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let Some(parent) = options.get_filename().parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::storage(OP, e))?;
            }
            pool_options.max_connections(settings.max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StoreError::storage(OP, e))?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the tables and index if absent.
    ///
    /// Safe to call against a database that already has the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the schema cannot be created.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::storage("store.sqlite.migrate", e))?;

        Ok(Self { pool })
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks that a connection can be acquired and used.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the database is unreachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage("store.sqlite.ping", e))?;
        Ok(())
    }

    async fn insert_event(
        conn: &mut SqliteConnection,
        event_type: &str,
        payload: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO events (event_type, payload) VALUES (?, ?)")
            .bind(event_type)
            .bind(payload)
            .execute(conn)
            .await?;
        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[async_trait]
impl UrlRepository for SqliteStore {
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64, StoreError> {
        const OP: &str = "store.sqlite.save_url";

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::storage(OP, e))?;

        // Returning early drops `tx`, which rolls both inserts back.
        let id = sqlx::query("INSERT INTO url (url, alias) VALUES (?, ?)")
            .bind(url)
            .bind(alias)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation_on_alias(&e) {
                    StoreError::AliasAlreadyExists {
                        alias: alias.to_string(),
                    }
                } else {
                    StoreError::storage(OP, e)
                }
            })?
            .last_insert_rowid();

        let payload = UrlCreatedPayload::new(id, url, alias)
            .to_json()
            .map_err(|e| StoreError::storage(OP, e))?;

        Self::insert_event(&mut *tx, URL_CREATED, &payload)
            .await
            .map_err(|e| StoreError::storage("store.sqlite.save_event", e))?;

        tx.commit().await.map_err(|e| StoreError::storage(OP, e))?;

        Ok(id)
    }

    async fn get_url(&self, alias: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::storage("store.sqlite.get_url", e))?
            .ok_or_else(|| StoreError::NotFound {
                alias: alias.to_string(),
            })
    }

    async fn delete_url(&self, alias: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM url WHERE alias = ?")
            .bind(alias)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage("store.sqlite.delete_url", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EventRepository for SqliteStore {
    async fn fetch_next_pending(&self) -> Result<Option<OutboxEvent>, StoreError> {
        const OP: &str = "store.sqlite.fetch_next_pending";

        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, event_type, payload, status, created_at
            FROM events
            WHERE status = 'new'
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::storage(OP, e))?;

        row.map(OutboxEvent::try_from)
            .transpose()
            .map_err(|e| StoreError::storage(OP, e))
    }

    async fn mark_done(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE events SET status = 'done' WHERE id = ? AND status = 'new'")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage("store.sqlite.mark_done", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn pending_count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE status = 'new'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::storage("store.sqlite.pending_count", e))
    }
}
