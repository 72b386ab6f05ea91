//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::repositories::EventRepository;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "outbox": { "status": "ok", "message": "Pending events: 0" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let outbox = check_outbox(&state).await;

    let all_healthy = database.is_ok() && outbox.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, outbox },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.store.ping().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => {
            error!(error = %e, "health check: database unreachable");
            CheckStatus::error("Database unavailable")
        }
    }
}

/// Reports how many events are still waiting for the poller.
async fn check_outbox(state: &AppState) -> CheckStatus {
    match state.store.pending_count().await {
        Ok(pending) => CheckStatus::ok(format!("Pending events: {}", pending)),
        Err(e) => {
            error!(error = %e, "health check: outbox unreadable");
            CheckStatus::error("Outbox unavailable")
        }
    }
}
