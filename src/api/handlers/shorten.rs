//! Handler for the JSON shorten endpoint.

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::handlers::reject_self_reference;
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "long_url": "https://example.com/some/long/path",
///   "short_token": "aZ09_bY18x",
///   "short_url": "https://s.example.com/aZ09_bY18x"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails, 503 if no unique token
/// could be allocated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    reject_self_reference(&state, &headers, &payload.url)?;

    let mapping = state.shortener.shorten(&payload.url).await?;
    let short_url = state.short_url(&mapping.short_token);

    Ok(Json(ShortenResponse {
        long_url: mapping.long_url,
        short_token: mapping.short_token,
        short_url,
    }))
}
