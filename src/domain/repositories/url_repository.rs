//! Repository trait for URL mapping data access.

use crate::error::StoreError;
use async_trait::async_trait;

/// Repository interface for alias → URL mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteStore`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a URL under `alias` and records a `URLCreated` outbox event in
    /// the same transaction. Returns the id of the new URL row.
    ///
    /// The alias is persisted as given; callers are responsible for rejecting
    /// empty or malformed aliases.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AliasAlreadyExists`] if the alias is taken.
    /// Returns [`StoreError::Storage`] on any other failure, in which case
    /// neither the URL row nor the event row is written.
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64, StoreError>;

    /// Looks up the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no row matches.
    /// Returns [`StoreError::Storage`] on database errors.
    async fn get_url(&self, alias: &str) -> Result<String, StoreError>;

    /// Deletes the mapping for `alias`.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on database errors.
    async fn delete_url(&self, alias: &str) -> Result<bool, StoreError>;
}
