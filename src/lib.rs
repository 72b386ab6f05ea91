//! # URL Outbox
//!
//! A URL shortening service built with Axum and SQLite that announces every
//! created link through a transactional outbox.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, event poller and sender
//! - **Application Layer** ([`application`]) - Alias handling and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Outbox
//!
//! Saving a URL inserts the mapping and a `URLCreated` event in one
//! transaction. A background poller delivers pending events one per tick and
//! marks them done. Delivery is at-least-once: an event whose acknowledgement
//! fails is delivered again on a later tick.
//!
//! ## Quick Start
//!
//! ```bash
//! export STORAGE_PATH="./storage/storage.db"
//! export EVENT_POLL_INTERVAL_MS=1000
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, StoreError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::UrlService;
    pub use crate::domain::entities::{EventStatus, OutboxEvent, SavedUrl, UrlCreatedPayload};
    pub use crate::domain::event_poller::{EventPoller, TickOutcome, start_event_polling};
    pub use crate::domain::event_sender::{DeliveryError, EventSender, LogEventSender};
    pub use crate::domain::repositories::{EventRepository, UrlRepository};
    pub use crate::error::{AppError, StoreError};
    pub use crate::infrastructure::persistence::{PoolSettings, SqliteStore};
    pub use crate::state::AppState;
}
