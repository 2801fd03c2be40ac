//! DTOs for mapping lookups.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored mapping as exposed by the JSON API.
#[derive(Debug, Serialize)]
pub struct MappingResponse {
    pub long_url: String,
    pub short_token: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}
