//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
/// Returns 500 Internal Server Error if the stored URL is not a valid
/// `Location` header value.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.url_service.resolve(&alias).await?;

    debug!(alias = %alias, url = %url, "got url");

    let location = HeaderValue::try_from(url).map_err(|e| {
        error!(alias = %alias, error = %e, "stored url is not a valid header value");
        AppError::internal("Stored URL cannot be redirected to", json!({ "alias": alias }))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
