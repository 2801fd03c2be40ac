//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::errors::{Column, StoreError};
use crate::domain::repositories::MappingRepository;

/// Unique index on `md5(long_url)`.
const LONG_URL_CONSTRAINT: &str = "mappings_long_url_key";
/// Unique constraint on `short_token`.
const SHORT_TOKEN_CONSTRAINT: &str = "mappings_short_token_key";

/// PostgreSQL repository for mapping storage.
///
/// Both uniqueness guarantees come from table constraints, so concurrent
/// inserts from any number of processes sharing the database stay correct.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    long_url: String,
    short_token: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for Mapping {
    fn from(row: MappingRow) -> Self {
        Mapping::new(row.id, row.long_url, row.short_token, row.created_at)
    }
}

/// Classifies an insert failure, recognizing unique violations by constraint name.
pub fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        let column = match db.constraint() {
            Some(LONG_URL_CONSTRAINT) => Some(Column::LongUrl),
            Some(SHORT_TOKEN_CONSTRAINT) => Some(Column::ShortToken),
            _ => None,
        };
        return StoreError::UniquenessViolation { column };
    }

    StoreError::backend(e)
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_long(&self, long_url: &str) -> Result<Option<Mapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, long_url, short_token, created_at
            FROM mappings
            WHERE md5(long_url) = md5($1) AND long_url = $1
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(StoreError::backend)?;

        Ok(row.map(Mapping::from))
    }

    async fn find_by_short(&self, short_token: &str) -> Result<Option<Mapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, long_url, short_token, created_at
            FROM mappings
            WHERE short_token = $1
            "#,
        )
        .bind(short_token)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(StoreError::backend)?;

        Ok(row.map(Mapping::from))
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO mappings (long_url, short_token)
            VALUES ($1, $2)
            RETURNING id, long_url, short_token, created_at
            "#,
        )
        .bind(&new_mapping.long_url)
        .bind(&new_mapping.short_token)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_insert_error)?;

        Ok(row.into())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM mappings")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(StoreError::backend)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }
}
