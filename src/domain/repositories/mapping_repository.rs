//! Repository trait for the mapping uniqueness store.

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Uniqueness store for long URL / short token mappings.
///
/// Both `long_url` and `short_token` are independently unique. Implementations
/// must make [`insert`](Self::insert) atomic: two concurrent inserts sharing a
/// long URL or a token can never both succeed. That guarantee is the only
/// conflict detection the shortening protocol relies on.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds the mapping whose long URL matches `long_url` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn find_by_long(&self, long_url: &str) -> Result<Option<Mapping>, StoreError>;

    /// Finds the mapping whose token matches `short_token` exactly (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn find_by_short(&self, short_token: &str) -> Result<Option<Mapping>, StoreError>;

    /// Atomically inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniquenessViolation`] if the long URL or the token
    /// is already stored. Returns [`StoreError::Backend`] on storage failures.
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError>;

    /// Counts stored mappings.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
