//! Error types for the storage layer and the HTTP API.
//!
//! [`StoreError`] is what repositories return; it keeps alias collisions and
//! missing rows distinguishable from infrastructure failures. [`AppError`] is
//! the HTTP-facing error, rendered as a JSON body:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "conflict",
//!     "message": "Alias already exists",
//!     "details": { "alias": "promo" }
//!   }
//! }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by URL and event repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The alias uniqueness constraint rejected the insert.
    #[error("alias '{alias}' already exists")]
    AliasAlreadyExists { alias: String },

    /// No URL is stored under the alias.
    #[error("url not found for alias '{alias}'")]
    NotFound { alias: String },

    /// Any other I/O, connection, statement or transaction failure.
    #[error("{op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    /// Wraps an underlying failure with the name of the operation that hit it.
    pub fn storage(op: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Storage {
            op,
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description included in every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application error mapped onto HTTP status codes.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable representation.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AliasAlreadyExists { alias } => {
                AppError::conflict("Alias already exists", json!({ "alias": alias }))
            }
            StoreError::NotFound { alias } => {
                AppError::not_found("Url not found", json!({ "alias": alias }))
            }
            // Storage details stay in the logs.
            StoreError::Storage { .. } => AppError::internal("Internal error", json!({})),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_exists_maps_to_conflict() {
        let err: AppError = StoreError::AliasAlreadyExists {
            alias: "promo".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_error_info().details["alias"], "promo");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: AppError = StoreError::NotFound {
            alias: "missing".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_error_info().code, "not_found");
    }

    #[test]
    fn test_storage_error_does_not_leak_details() {
        let err: AppError = StoreError::storage(
            "store.sqlite.get_url",
            std::io::Error::other("disk I/O error at /var/lib/db"),
        )
        .into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let info = err.to_error_info();
        assert_eq!(info.message, "Internal error");
        assert!(!info.details.to_string().contains("/var/lib/db"));
    }

    #[test]
    fn test_storage_error_display_includes_operation() {
        let err = StoreError::storage("store.sqlite.save_url", std::io::Error::other("boom"));

        assert_eq!(err.to_string(), "store.sqlite.save_url: boom");
    }
}
