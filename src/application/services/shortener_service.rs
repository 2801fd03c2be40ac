//! Short token allocation and resolution service.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::errors::{Column, ShortenError, StoreError};
use crate::domain::repositories::MappingRepository;
use crate::utils::token_generator::TokenGenerator;
use crate::utils::url_validator::validate_url;

/// Number of tokens tried before shortening gives up.
pub const MAX_ATTEMPTS: usize = 3;

/// Service for shortening long URLs and resolving short tokens.
///
/// Holds no state besides its collaborators: every call round-trips to the
/// store, and conflicting writes are serialized only by the store's atomic
/// insert. Safe to share behind an `Arc` across tasks and processes.
pub struct ShortenerService {
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn TokenGenerator>,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(repository: Arc<dyn MappingRepository>, generator: Arc<dyn TokenGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Returns the mapping for `long_url`, creating it on first use.
    ///
    /// # Idempotence
    ///
    /// If the URL is already stored, the existing mapping is returned and the
    /// store is not touched. The same URL therefore always yields the same token.
    ///
    /// # Token Allocation
    ///
    /// Otherwise up to [`MAX_ATTEMPTS`] random tokens are offered to the store.
    /// When an insert hits a uniqueness violation that may concern the long
    /// URL, the store is re-read: a concurrent caller that won the race has
    /// already created the mapping, and it is returned instead of retrying.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::InvalidUrl`] if `long_url` is not a valid absolute URI.
    /// Returns [`ShortenError::NonUniqueShort`] if every attempted token collided.
    /// Returns [`ShortenError::Store`] on storage backend failures.
    pub async fn shorten(&self, long_url: &str) -> Result<Mapping, ShortenError> {
        validate_url(long_url).map_err(|e| ShortenError::InvalidUrl {
            url: long_url.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(existing) = self.repository.find_by_long(long_url).await? {
            debug!(token = %existing.short_token, "URL already shortened");
            return Ok(existing);
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let candidate = self.generator.generate();

            match self
                .repository
                .insert(NewMapping::new(long_url, candidate))
                .await
            {
                Ok(mapping) => {
                    info!(
                        token = %mapping.short_token,
                        attempt,
                        "Saved url [{}]", mapping.long_url
                    );
                    return Ok(mapping);
                }
                Err(StoreError::UniquenessViolation { column }) => {
                    warn!(
                        attempt,
                        column = ?column,
                        "Uniqueness violation while inserting mapping"
                    );

                    if column != Some(Column::ShortToken)
                        && let Some(existing) = self.repository.find_by_long(long_url).await?
                    {
                        debug!(token = %existing.short_token, "URL shortened concurrently");
                        return Ok(existing);
                    }
                }
                Err(e) => {
                    error!("Failed to insert mapping: {}", e);
                    return Err(e.into());
                }
            }
        }

        error!(
            attempts = MAX_ATTEMPTS,
            "Unable to generate unique short sequence for [{}]", long_url
        );
        Err(ShortenError::NonUniqueShort {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Resolves a short token to its mapping.
    ///
    /// The token must match exactly, including case.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::UrlNotFound`] if no mapping has this token.
    /// Returns [`ShortenError::Store`] on storage backend failures.
    pub async fn lookup(&self, short_token: &str) -> Result<Mapping, ShortenError> {
        self.repository
            .find_by_short(short_token)
            .await?
            .ok_or_else(|| ShortenError::UrlNotFound {
                token: short_token.to_string(),
            })
    }

    /// Number of stored mappings.
    pub async fn count(&self) -> Result<i64, ShortenError> {
        Ok(self.repository.count().await?)
    }

    /// Verifies the underlying store is reachable.
    pub async fn check_storage(&self) -> Result<(), StoreError> {
        self.repository.ping().await
    }
}
