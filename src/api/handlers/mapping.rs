//! Handler for JSON mapping lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::mapping::MappingResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the mapping stored for a token without redirecting.
///
/// # Endpoint
///
/// `GET /api/mappings/{token}`
///
/// # Errors
///
/// Returns 404 Not Found if no mapping has this token.
pub async fn mapping_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MappingResponse>, AppError> {
    let mapping = state.shortener.lookup(&token).await?;
    let short_url = state.short_url(&mapping.short_token);

    Ok(Json(MappingResponse {
        long_url: mapping.long_url,
        short_token: mapping.short_token,
        short_url,
        created_at: mapping.created_at,
    }))
}
