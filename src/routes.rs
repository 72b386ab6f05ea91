//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /url`          - Shorten a URL
//! - `DELETE /url/{alias}`  - Delete a short URL
//! - `GET    /health`       - Health check: database and outbox backlog
//! - `GET    /{alias}`      - Redirect to the stored URL
//!
//! Every request is traced and trailing slashes are trimmed before routing.

use crate::api::handlers::{delete_handler, health_handler, redirect_handler, save_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{delete, get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/url", post(save_handler))
        .route("/url/{alias}", delete(delete_handler))
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
