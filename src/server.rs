//! HTTP server initialization and runtime setup.
//!
//! Opens the store, starts the outbox poller and runs the Axum server until
//! Ctrl-C, then stops the poller.

use crate::application::services::UrlService;
use crate::config::Config;
use crate::domain::event_poller::start_event_polling;
use crate::domain::event_sender::LogEventSender;
use crate::infrastructure::persistence::SqliteStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool and schema
/// - Background event poller
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The database cannot be opened or migrated
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = Arc::new(
        SqliteStore::connect(&config.database_url, config.pool_settings())
            .await
            .context("Failed to initialize storage")?,
    );
    tracing::info!("Connected to database");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = start_event_polling(
        store.clone(),
        Arc::new(LogEventSender::new()),
        config.event_poll_interval(),
        shutdown_rx,
    );
    tracing::info!("Event poller started");

    let url_service = Arc::new(UrlService::new(store.clone(), config.alias_length));
    let state = AppState::new(url_service, store);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    poller.await.context("Event poller task failed")?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
