//! Request timeout and concurrency limiting.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tower_http::timeout::TimeoutLayer;

/// Shared pool of in-flight request slots.
///
/// Cloning shares the pool, so every route layered with the same limit draws
/// from one semaphore.
#[derive(Debug, Clone)]
pub struct InFlightLimit {
    semaphore: Arc<Semaphore>,
}

impl InFlightLimit {
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_in_flight)),
        }
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Caps the number of requests processed at once across the whole router.
///
/// Requests beyond the cap wait for a free slot instead of being rejected.
/// The wait happens inside the request future, so an enclosing timeout
/// covers it.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/set", post(set_handler))
///     .layer(middleware::from_fn_with_state(InFlightLimit::new(100), limits::limit_in_flight));
/// ```
pub async fn limit_in_flight(
    State(limit): State<InFlightLimit>,
    req: Request,
    next: Next,
) -> Response {
    let Ok(_permit) = limit.semaphore.acquire().await else {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    next.run(req).await
}

/// Fails requests that take longer than `timeout` with `408 Request Timeout`.
pub fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
