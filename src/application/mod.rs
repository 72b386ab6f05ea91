//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! - [`services::url_service::UrlService`] - Shorten, resolve and delete URLs

pub mod services;
