//! DTOs for the JSON shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(length(min = 1, max = 4096), url(message = "Invalid URL format"))]
    pub url: String,
}

/// The mapping created (or found) for a shorten request.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub long_url: String,
    pub short_token: String,
    pub short_url: String,
}
