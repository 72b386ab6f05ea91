//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; the SQLite implementation
//! lives in `crate::infrastructure::persistence`. Mock implementations are
//! generated via `mockall` for unit tests.
//!
//! - [`UrlRepository`] - Save, resolve and delete URL mappings
//! - [`EventRepository`] - Drain the outbox of pending events
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod event_repository;
pub mod url_repository;

pub use event_repository::EventRepository;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
