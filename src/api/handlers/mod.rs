//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod mapping;
pub mod redirect;
pub mod set;
pub mod shorten;

pub use health::health_handler;
pub use mapping::mapping_handler;
pub use redirect::{redirect_handler, redirect_options_handler};
pub use set::{set_handler, set_options_handler};
pub use shorten::shorten_handler;

use axum::http::{HeaderMap, header};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::points_to_host;

/// Cache policy sent with `OPTIONS` responses.
pub const OPTIONS_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Refuses long URLs that point back at this service.
///
/// The service's own host is taken from the request `Host` header and from
/// the configured public base URL.
pub(crate) fn reject_self_reference(
    state: &AppState,
    headers: &HeaderMap,
    long_url: &str,
) -> Result<(), AppError> {
    let request_host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok());

    let is_self = request_host.is_some_and(|host| points_to_host(long_url, host))
        || state
            .public_host
            .as_deref()
            .is_some_and(|host| points_to_host(long_url, host));

    if is_self {
        return Err(AppError::bad_request(
            "Refusing to shorten a link to this service",
            json!({ "url": long_url }),
        ));
    }

    Ok(())
}
