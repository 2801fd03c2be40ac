//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST    /set`      - Shorten a `text/plain` URL body, respond with the token
//! - `OPTIONS /set`      - Allowed methods and media type
//! - `GET     /{token}`  - Permanent redirect to the long URL
//! - `OPTIONS /{token}`  - Allowed methods
//! - `GET     /health`   - Storage health check
//! - `/api/*`            - JSON API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline (`408` when exceeded)
//! - **Concurrency limit** - Bounded number of in-flight requests, shared by all routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    health_handler, redirect_handler, redirect_options_handler, set_handler, set_options_handler,
};
use crate::api::middleware::{limits, tracing};
use crate::state::AppState;
use crate::utils::url_validator::MAX_URL_LENGTH;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Transport limits applied to every route.
#[derive(Debug, Clone, Copy)]
pub struct RouterSettings {
    pub max_connections: usize,
    pub request_timeout: Duration,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            max_connections: 100,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Builds the router with all routes and middleware, without path normalization.
pub fn router(state: AppState, settings: RouterSettings) -> Router {
    Router::new()
        .route(
            "/set",
            post(set_handler)
                .options(set_options_handler)
                .layer(DefaultBodyLimit::max(MAX_URL_LENGTH)),
        )
        .route("/health", get(health_handler))
        .route(
            "/{token}",
            get(redirect_handler).options(redirect_options_handler),
        )
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            limits::InFlightLimit::new(settings.max_connections),
            limits::limit_in_flight,
        ))
        // Outside the limiter, so waiting for a slot counts against the deadline.
        .layer(limits::timeout_layer(settings.request_timeout))
        .layer(tracing::layer())
}

/// Constructs the application router with trailing slashes trimmed.
pub fn app_router(state: AppState, settings: RouterSettings) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, settings))
}
