//! Handler for URL deletion.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::url::MessageResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes the URL stored under an alias.
///
/// # Endpoint
///
/// `DELETE /url/{alias}`
///
/// Outbox events already written for the alias are kept.
///
/// # Errors
///
/// Returns 404 Not Found if nothing is stored under the alias.
pub async fn delete_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.url_service.delete(&alias).await?;

    Ok(Json(MessageResponse {
        message: "url deleted successfully".to_string(),
    }))
}
