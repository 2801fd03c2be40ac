mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{Behavior, StubRepository};
use shrtn::routes::{RouterSettings, router};
use std::time::Duration;
use tower::ServiceExt;

async fn get(app: &Router, uri: &str) -> StatusCode {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

fn app(repo: &std::sync::Arc<StubRepository>, max_connections: usize, timeout: Duration) -> Router {
    router(
        common::state_over(repo.clone()),
        RouterSettings {
            max_connections,
            request_timeout: timeout,
        },
    )
}

#[tokio::test]
async fn test_in_flight_cap_is_shared_across_routes() {
    let repo = StubRepository::new(Behavior::Slow(Duration::from_millis(300)));
    let app = app(&repo, 1, Duration::from_secs(10));

    let (redirect, mapping) = tokio::join!(
        get(&app, "/abcdefghij"),
        get(&app, "/api/mappings/abcdefghij")
    );

    assert_eq!(redirect, StatusCode::NOT_FOUND);
    assert_eq!(mapping, StatusCode::NOT_FOUND);
    assert_eq!(repo.peak_in_flight(), 1);
}

#[tokio::test]
async fn test_requests_run_concurrently_below_cap() {
    let repo = StubRepository::new(Behavior::Slow(Duration::from_millis(300)));
    let app = app(&repo, 4, Duration::from_secs(10));

    tokio::join!(
        get(&app, "/abcdefghij"),
        get(&app, "/api/mappings/abcdefghij")
    );

    assert_eq!(repo.peak_in_flight(), 2);
}

#[tokio::test]
async fn test_slow_request_times_out_with_408() {
    let repo = StubRepository::new(Behavior::Slow(Duration::from_secs(2)));
    let app = app(&repo, 100, Duration::from_millis(100));

    assert_eq!(get(&app, "/abcdefghij").await, StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_waiting_for_a_slot_counts_against_timeout() {
    let repo = StubRepository::new(Behavior::Slow(Duration::from_millis(300)));
    let app = app(&repo, 1, Duration::from_millis(450));

    // One request gets the slot and finishes in time; the other waits
    // 300ms for the slot and then needs another 300ms.
    let (a, b) = tokio::join!(get(&app, "/abcdefghij"), get(&app, "/abcdefghij"));

    let mut statuses = vec![a, b];
    statuses.sort();
    assert_eq!(
        statuses,
        vec![StatusCode::NOT_FOUND, StatusCode::REQUEST_TIMEOUT]
    );
}
