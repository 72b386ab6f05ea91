//! Alias generation and validation.
//!
//! Generated aliases are random alphanumeric strings; caller-chosen aliases
//! are checked against a small character set and the reserved route names.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::json;

/// Maximum length of a caller-chosen alias.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Aliases that would shadow service routes.
const RESERVED_ALIASES: &[&str] = &["url", "health"];

/// Generates a random alias of `length` characters from `[A-Za-z0-9]`.
///
/// Never returns a reserved alias.
pub fn generate_alias(length: usize) -> String {
    first_unreserved(std::iter::repeat_with(|| random_alias(length)))
}

fn random_alias(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

fn first_unreserved(mut candidates: impl Iterator<Item = String>) -> String {
    candidates
        .find(|alias| !is_reserved_alias(alias))
        .unwrap_or_default()
}

/// Returns true if `alias` would shadow a service route.
pub fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}

/// Validates a caller-chosen alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Alias must be 1-64 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    if is_reserved_alias(alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
