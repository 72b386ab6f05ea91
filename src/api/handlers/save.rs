//! Handler for the URL saving endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::url::{SaveUrlRequest, SaveUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "promo" }
/// ```
///
/// `alias` is optional; a random six-character alias is generated when it is
/// missing or empty.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "status": "Ok", "alias": "promo" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is not valid JSON, misses `url`, or the URL
///   or alias is invalid
/// - 409 Conflict if the alias is already taken
/// - 500 Internal Server Error on storage failure
pub async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveUrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let saved = state
        .url_service
        .shorten(&payload.url, payload.alias)
        .await?;

    Ok((StatusCode::CREATED, Json(SaveUrlResponse::ok(saved.alias))))
}
