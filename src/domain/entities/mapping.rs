//! Mapping entity pairing a long URL with its short token.

use chrono::{DateTime, Utc};

/// A persisted long URL to short token mapping.
///
/// Mappings are immutable once stored. Both `long_url` and `short_token` are
/// unique across the store; `id` and `created_at` are assigned by the store
/// and carry no meaning for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub id: i64,
    pub long_url: String,
    pub short_token: String,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(
        id: i64,
        long_url: String,
        short_token: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            long_url,
            short_token,
            created_at,
        }
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub long_url: String,
    pub short_token: String,
}

impl NewMapping {
    pub fn new(long_url: impl Into<String>, short_token: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            short_token: short_token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = Mapping::new(
            1,
            "https://example.com".to_string(),
            "abcDEF123_".to_string(),
            now,
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.long_url, "https://example.com");
        assert_eq!(mapping.short_token, "abcDEF123_");
        assert_eq!(mapping.created_at, now);
    }

    #[test]
    fn test_new_mapping_from_str() {
        let new_mapping = NewMapping::new("https://rust-lang.org", "xyz789XYZ0");

        assert_eq!(new_mapping.long_url, "https://rust-lang.org");
        assert_eq!(new_mapping.short_token, "xyz789XYZ0");
    }
}
