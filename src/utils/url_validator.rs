//! Long URL validation.
//!
//! Long URLs are stored exactly as submitted, so validation only accepts or
//! rejects; it never rewrites the input.

use url::Url;

/// Maximum accepted long URL length in bytes.
pub const MAX_URL_LENGTH: usize = 4096;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL is {0} bytes long, the maximum is {MAX_URL_LENGTH}")]
    TooLong(usize),

    #[error("URL has leading or trailing whitespace")]
    SurroundingWhitespace,

    #[error("URL contains a control character or space at byte {0}")]
    ControlCharacter(usize),

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),
}

/// Checks that `input` is a syntactically valid absolute URI.
///
/// # Rules
///
/// 1. Non-empty and at most [`MAX_URL_LENGTH`] bytes
/// 2. No leading or trailing whitespace (the parser would silently trim it)
/// 3. No ASCII control characters or spaces anywhere (the parser would strip
///    or percent-encode them, so the stored value would not be a valid URI)
/// 4. Parses as an absolute URI: a scheme followed by an authority or path
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] rule that fails.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com/path").is_ok());
/// assert!(validate_url("not a url").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong(input.len()));
    }

    if input.trim() != input {
        return Err(UrlValidationError::SurroundingWhitespace);
    }

    if let Some(pos) = input.bytes().position(|b| b.is_ascii_control() || b == b' ') {
        return Err(UrlValidationError::ControlCharacter(pos));
    }

    Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    Ok(())
}

/// Returns true if `long_url` points at `host` (port and case ignored).
///
/// Used by the HTTP layer to refuse shortening links to the shortener itself.
pub fn points_to_host(long_url: &str, host: &str) -> bool {
    let host = strip_port(host);
    if host.is_empty() {
        return false;
    }

    Url::parse(long_url)
        .ok()
        .and_then(|url| url.host_str().map(|h| h.eq_ignore_ascii_case(host)))
        .unwrap_or(false)
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals keep their colons.
    if let Some(end) = host.find(']') {
        return &host[..=end];
    }
    host.split(':').next().unwrap_or(host)
}
