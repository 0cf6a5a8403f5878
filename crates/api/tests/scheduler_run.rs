//! Integration tests for the scheduler trigger endpoint's response contract.
//!
//! The endpoint must never silently no-op on failure: an unreachable store
//! yields a 500 carrying both a summary message and the underlying error.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

// ---------------------------------------------------------------------------
// Test: store failure surfaces 500 with { message, error }
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_with_unreachable_store_returns_500_with_message_and_error() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/api/v1/scheduler/run").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    // Summary message is always present, even on failure.
    assert!(json["message"].is_string());
    assert!(json["message"].as_str().unwrap().contains("Scheduler run"));
    // Failure detail accompanies the summary.
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Test: the trigger is GET-only with no request body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_endpoint_rejects_post() {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let app = common::build_test_app(common::unreachable_pool());
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/scheduler/run")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
