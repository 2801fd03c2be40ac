//! Domain error taxonomy.
//!
//! [`StoreError`] is what a uniqueness store reports to the shortening
//! protocol. [`ShortenError`] is what the protocol reports to its callers;
//! a [`StoreError::UniquenessViolation`] is always absorbed by the retry loop
//! and never converted into one.

use std::fmt;

/// A uniquely-constrained column of the mapping store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    LongUrl,
    ShortToken,
}

impl Column {
    fn as_str(&self) -> &'static str {
        match self {
            Column::LongUrl => "long_url",
            Column::ShortToken => "short_token",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn column_name(column: &Option<Column>) -> &'static str {
    column.map_or("unknown column", |c| c.as_str())
}

/// Failures reported by a [`crate::domain::repositories::MappingRepository`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert would break the uniqueness of `long_url` or `short_token`.
    ///
    /// `column` is `None` when the engine cannot tell which constraint fired.
    #[error("uniqueness violation on {}", column_name(.column))]
    UniquenessViolation { column: Option<Column> },

    /// The storage engine itself failed (connection loss, timeout, bad schema).
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Failures of the shorten and lookup operations.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    /// The submitted long URL is not a well-formed absolute URI.
    #[error("Bad url [ {url} ]: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Every generated token collided with an existing one.
    #[error("Unable to generate unique short sequence after {attempts} attempts")]
    NonUniqueShort { attempts: usize },

    /// No mapping carries the requested token.
    #[error("Given url wasn't found for token [ {token} ]")]
    UrlNotFound { token: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
