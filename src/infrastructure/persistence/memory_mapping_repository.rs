//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::errors::{Column, StoreError};
use crate::domain::repositories::MappingRepository;

#[derive(Debug, Default)]
struct Tables {
    rows: Vec<Mapping>,
    by_long: HashMap<String, usize>,
    by_short: HashMap<String, usize>,
}

/// Process-local mapping store.
///
/// Both indexes live behind a single mutex, so the two uniqueness checks and
/// the insert happen as one atomic step. The lock is never held across an
/// `.await`. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryMappingRepository {
    tables: Mutex<Tables>,
}

impl InMemoryMappingRepository {
    /// Creates an empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // Every mutation completes before the guard drops, so a poisoned
        // lock still guards consistent tables.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn find_by_long(&self, long_url: &str) -> Result<Option<Mapping>, StoreError> {
        let tables = self.lock();
        Ok(tables
            .by_long
            .get(long_url)
            .map(|&idx| tables.rows[idx].clone()))
    }

    async fn find_by_short(&self, short_token: &str) -> Result<Option<Mapping>, StoreError> {
        let tables = self.lock();
        Ok(tables
            .by_short
            .get(short_token)
            .map(|&idx| tables.rows[idx].clone()))
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        let mut tables = self.lock();

        if tables.by_long.contains_key(&new_mapping.long_url) {
            return Err(StoreError::UniquenessViolation {
                column: Some(Column::LongUrl),
            });
        }
        if tables.by_short.contains_key(&new_mapping.short_token) {
            return Err(StoreError::UniquenessViolation {
                column: Some(Column::ShortToken),
            });
        }

        let idx = tables.rows.len();
        let mapping = Mapping::new(
            idx as i64 + 1,
            new_mapping.long_url,
            new_mapping.short_token,
            Utc::now(),
        );

        tables.by_long.insert(mapping.long_url.clone(), idx);
        tables.by_short.insert(mapping.short_token.clone(), idx);
        tables.rows.push(mapping.clone());

        Ok(mapping)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.len() as i64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
