//! DTOs for saving and deleting URLs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Status value of a successful [`SaveUrlResponse`].
pub const STATUS_OK: &str = "Ok";

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveUrlRequest {
    /// The URL to redirect to.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional alias; a random one is generated when absent or empty.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub alias: Option<String>,
}

/// Response carrying the alias the URL was stored under.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveUrlResponse {
    pub status: String,
    pub alias: String,
}

impl SaveUrlResponse {
    pub fn ok(alias: String) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            alias,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
