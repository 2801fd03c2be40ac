//! JSON API route configuration.

use crate::api::handlers::{mapping_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`          - Shorten a URL, returns the mapping as JSON
/// - `GET  /mappings/{token}` - Inspect a mapping without redirecting
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/mappings/{token}", get(mapping_handler))
}
