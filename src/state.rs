//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::infrastructure::persistence::SqliteStore;

/// Handles shared by all requests.
///
/// The same [`SqliteStore`] is also handed to the event poller at startup.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<SqliteStore>>,
    pub store: Arc<SqliteStore>,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService<SqliteStore>>, store: Arc<SqliteStore>) -> Self {
        Self { url_service, store }
    }
}
