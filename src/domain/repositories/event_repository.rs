//! Repository trait for the outbox event table.

use crate::domain::entities::OutboxEvent;
use crate::error::StoreError;
use async_trait::async_trait;

/// Read and acknowledge side of the outbox.
///
/// Events are only ever inserted by [`super::UrlRepository::save_url`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Fetches the oldest event still in status `new`, lowest id first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on database errors.
    async fn fetch_next_pending(&self) -> Result<Option<OutboxEvent>, StoreError>;

    /// Moves an event from `new` to `done`.
    ///
    /// Returns `Ok(false)` if the event does not exist or is already done.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on database errors.
    async fn mark_done(&self, id: i64) -> Result<bool, StoreError>;

    /// Number of events still waiting for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on database errors.
    async fn pending_count(&self) -> Result<i64, StoreError>;
}
