//! Plain-text shorten endpoint.

use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::api::handlers::{OPTIONS_CACHE_CONTROL, reject_self_reference};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::MAX_URL_LENGTH;

/// Shortens the long URL sent as the raw request body.
///
/// # Endpoint
///
/// `POST /set` with `Content-Type: text/plain`
///
/// # Response
///
/// `200 OK`, `text/plain` body containing the short token. Shortening the
/// same URL again returns the same token.
///
/// # Errors
///
/// - 415 if the content type is not `text/plain`
/// - 413 if the body exceeds 4096 bytes
/// - 400 if the body is empty, not a valid absolute URL, or points at this service
/// - 503 if no unique token could be allocated
pub async fn set_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    if !is_text_plain(&headers) {
        return Err(AppError::unsupported_media_type(
            "Content-Type must be text/plain",
            json!({
                "content_type": headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
            }),
        ));
    }

    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::payload_too_large(
                "Max request content length is 4KB",
                json!({ "max_bytes": MAX_URL_LENGTH }),
            )
        } else {
            AppError::bad_request(rejection.body_text(), json!({}))
        }
    })?;

    let long_url = std::str::from_utf8(&body)
        .map_err(|_| AppError::bad_request("Body must be valid UTF-8", json!({})))?
        .trim();

    if long_url.is_empty() {
        return Err(AppError::bad_request("Body must contain a URL", json!({})));
    }

    reject_self_reference(&state, &headers, long_url)?;

    let mapping = state.shortener.shorten(long_url).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain")],
        mapping.short_token,
    ))
}

/// Advertises the methods and media type accepted by `/set`.
///
/// # Endpoint
///
/// `OPTIONS /set`
pub async fn set_options_handler() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCEPT, "text/plain"),
            (header::ALLOW, "OPTIONS, POST"),
            (header::CACHE_CONTROL, OPTIONS_CACHE_CONTROL),
        ],
    )
}

fn is_text_plain(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("text/plain"))
}
