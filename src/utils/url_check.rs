//! Checks on target URLs beyond what the `validator` URL rule enforces.

use crate::error::AppError;
use serde_json::json;

/// Rejects URLs that cannot be sent back in a `Location` header.
///
/// URL parsing silently drops tabs and newlines, so a URL can pass the
/// `validator` rule while still containing ASCII control characters.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `url` contains a control character.
pub fn ensure_redirectable(url: &str) -> Result<(), AppError> {
    if let Some(position) = url.chars().position(|c| c.is_ascii_control()) {
        return Err(AppError::bad_request(
            "URL contains control characters",
            json!({ "position": position }),
        ));
    }

    Ok(())
}
