//! Health endpoint tests.

mod common;

use axum::http::StatusCode;

use common::{build_test_app, json_body, request};

#[tokio::test]
async fn health_reports_degraded_when_the_database_is_unreachable() {
    let app = build_test_app();

    let response = request(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    // The test pool points at a closed port, so the db check fails; the
    // endpoint itself still answers.
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["db_healthy"], false);
    assert!(body["version"].as_str().is_some());
}
