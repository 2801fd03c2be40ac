//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::api::handlers::OPTIONS_CACHE_CONTROL;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short token to its original URL.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// Mappings never change, so the redirect is permanent (`301`).
///
/// # Errors
///
/// Returns 404 Not Found if no mapping has this token. Tokens are
/// case-sensitive and never normalized.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let mapping = state.shortener.lookup(&token).await?;

    debug!(token = %token, "Result was [{}]", mapping.long_url);

    let location = HeaderValue::from_str(&mapping.long_url).map_err(|_| {
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "token": token }),
        )
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

/// Advertises the methods accepted on short links.
///
/// # Endpoint
///
/// `OPTIONS /{token}`
pub async fn redirect_options_handler() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ALLOW, "OPTIONS, GET"),
            (header::CACHE_CONTROL, OPTIONS_CACHE_CONTROL),
        ],
    )
}
