//! Domain layer containing business entities and the outbox machinery.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`event_sender`] - Delivery sink for outbox events
//! - [`event_poller`] - Background task draining pending events
//!
//! # Outbox Flow
//!
//! 1. [`repositories::UrlRepository::save_url`] writes the URL row and a
//!    `URLCreated` event in one transaction
//! 2. [`event_poller::EventPoller`] wakes up every interval and fetches the
//!    oldest pending event
//! 3. The event goes to an [`event_sender::EventSender`]
//! 4. On success the event is marked `done`; otherwise it stays `new`

pub mod entities;
pub mod event_poller;
pub mod event_sender;
pub mod repositories;
