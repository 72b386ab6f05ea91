//! Core domain entities.
//!
//! - [`OutboxEvent`] - A pending or delivered outbox record
//! - [`UrlCreatedPayload`] - Structured body of a `URLCreated` event
//! - [`SavedUrl`] - What the service hands back after a successful save

pub mod event;
pub mod url;

pub use event::{EventStatus, OutboxEvent, PAYLOAD_VERSION, URL_CREATED, UrlCreatedPayload};
pub use url::SavedUrl;
