//! URL shortening, resolution and deletion.

use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::entities::SavedUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, StoreError};
use crate::utils::alias_generator::{generate_alias, validate_alias};
use crate::utils::url_check::ensure_redirectable;

/// How many random aliases are tried before giving up.
const MAX_ALIAS_ATTEMPTS: usize = 10;

/// Service for creating, resolving and deleting short URLs.
pub struct UrlService<R: UrlRepository> {
    repository: Arc<R>,
    alias_length: usize,
}

impl<R: UrlRepository> UrlService<R> {
    /// Creates a new URL service generating aliases of `alias_length` characters.
    pub fn new(repository: Arc<R>, alias_length: usize) -> Self {
        Self {
            repository,
            alias_length,
        }
    }

    /// Stores `url` under `alias`, or under a random alias when none is given.
    ///
    /// An empty alias counts as none. A caller-chosen alias is never retried;
    /// a generated one is regenerated on collision up to 10 times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` holds control characters or a
    /// supplied alias is malformed or reserved.
    /// Returns [`AppError::Conflict`] if a supplied alias is already taken.
    /// Returns [`AppError::Internal`] on storage errors or too many collisions.
    pub async fn shorten(&self, url: &str, alias: Option<String>) -> Result<SavedUrl, AppError> {
        ensure_redirectable(url)?;

        let saved = match alias.filter(|a| !a.is_empty()) {
            Some(alias) => {
                validate_alias(&alias)?;

                let id = self
                    .repository
                    .save_url(url, &alias)
                    .await
                    .map_err(|e| to_app_error("save url", e))?;

                SavedUrl::new(id, alias)
            }
            None => self.save_with_generated_alias(url).await?,
        };

        info!(id = saved.id, alias = %saved.alias, "url added");
        counter!("urls_created_total").increment(1);

        Ok(saved)
    }

    /// Returns the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is unknown.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        self.repository
            .get_url(alias)
            .await
            .map_err(|e| to_app_error("get url", e))
    }

    /// Deletes the mapping stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing was stored under the alias.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete(&self, alias: &str) -> Result<(), AppError> {
        let deleted = self
            .repository
            .delete_url(alias)
            .await
            .map_err(|e| to_app_error("delete url", e))?;

        if !deleted {
            return Err(AppError::not_found(
                "Url not found",
                json!({ "alias": alias }),
            ));
        }

        info!(alias = %alias, "url deleted");
        Ok(())
    }

    async fn save_with_generated_alias(&self, url: &str) -> Result<SavedUrl, AppError> {
        for attempt in 1..=MAX_ALIAS_ATTEMPTS {
            let alias = generate_alias(self.alias_length);

            match self.repository.save_url(url, &alias).await {
                Ok(id) => return Ok(SavedUrl::new(id, alias)),
                Err(StoreError::AliasAlreadyExists { .. }) => {
                    warn!(attempt, alias = %alias, "alias collision, retrying");
                }
                Err(e) => return Err(to_app_error("save url", e)),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique alias",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

/// Logs storage failures before they are flattened into a generic 500.
fn to_app_error(action: &'static str, e: StoreError) -> AppError {
    match &e {
        StoreError::Storage { .. } => error!(action, error = %e, "storage failure"),
        _ => info!(action, error = %e, "request rejected"),
    }
    e.into()
}
