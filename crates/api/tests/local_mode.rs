//! End-to-end tests for the unauthenticated (device-local) path, driven
//! through the real router and middleware stack. No request here touches
//! the database.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

use common::{build_test_app, json_body, request};

// ---------------------------------------------------------------------------
// Contest CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_list_returns_newest_first_with_derived_fields() {
    let app = build_test_app();

    let deadline = (Utc::now() + Duration::days(5)).to_rfc3339();
    let first = request(
        &app,
        "POST",
        "/api/v1/contests",
        Some(json!({ "title": "Poster Contest", "progress": 40, "deadline": deadline })),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = json_body(first).await;
    assert_eq!(first["data"]["title"], "Poster Contest");
    assert_eq!(first["data"]["status"], "preparing");
    assert_eq!(first["data"]["progress"], 40);
    assert_eq!(first["data"]["days_left"], 5);
    assert_eq!(first["data"]["urgency"], "warning");

    let second = request(
        &app,
        "POST",
        "/api/v1/contests",
        Some(json!({ "title": "Eco Hackathon" })),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CREATED);

    let list = request(&app, "GET", "/api/v1/contests?scope=mine", None).await;
    assert_eq!(list.status(), StatusCode::OK);
    let list = json_body(list).await;
    let items = list["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Eco Hackathon");
    assert_eq!(items[1]["title"], "Poster Contest");
}

#[tokio::test]
async fn create_rejects_blank_title() {
    let app = build_test_app();

    let response = request(&app, "POST", "/api/v1/contests", Some(json!({ "title": "" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_rejects_unknown_status() {
    let app = build_test_app();

    let response = request(
        &app,
        "POST",
        "/api/v1/contests",
        Some(json!({ "title": "X", "status": "procrastinating" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_patches_only_provided_fields() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/contests",
            Some(json!({ "title": "Draft", "organization": "City Hall" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let updated = request(
        &app,
        "PUT",
        &format!("/api/v1/contests/{id}"),
        Some(json!({ "status": "in_progress" })),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = json_body(updated).await;
    assert_eq!(updated["data"]["status"], "in_progress");
    // Untouched fields survive the patch.
    assert_eq!(updated["data"]["title"], "Draft");
    assert_eq!(updated["data"]["organization"], "City Hall");
}

#[tokio::test]
async fn delete_removes_the_contest_and_get_returns_404() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/contests",
            Some(json!({ "title": "Ephemeral" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let deleted = request(&app, "DELETE", &format!("/api/v1/contests/{id}"), None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = request(&app, "GET", &format!("/api/v1/contests/{id}"), None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body = json_body(missing).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Tasks drive progress
// ---------------------------------------------------------------------------

#[tokio::test]
async fn checklist_overrides_free_form_progress() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/contests",
            Some(json!({ "title": "Task-driven", "progress": 40 })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    // First task appears: progress becomes checklist-derived (0/1 done).
    let task = json_body(
        request(
            &app,
            "POST",
            &format!("/api/v1/contests/{id}/tasks"),
            Some(json!({ "title": "Sketch concept" })),
        )
        .await,
    )
    .await;
    let task_id = task["data"]["id"].as_i64().unwrap();

    request(
        &app,
        "POST",
        &format!("/api/v1/contests/{id}/tasks"),
        Some(json!({ "title": "Final render" })),
    )
    .await;

    let contest = json_body(request(&app, "GET", &format!("/api/v1/contests/{id}"), None).await).await;
    assert_eq!(contest["data"]["progress"], 0);

    // Completing 1 of 2 tasks lands at 50.
    let completed = request(
        &app,
        "PUT",
        &format!("/api/v1/contests/{id}/tasks/{task_id}"),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(completed.status(), StatusCode::OK);

    let contest = json_body(request(&app, "GET", &format!("/api/v1/contests/{id}"), None).await).await;
    assert_eq!(contest["data"]["progress"], 50);

    // A direct progress patch is overridden while tasks exist.
    let patched = json_body(
        request(
            &app,
            "PUT",
            &format!("/api/v1/contests/{id}"),
            Some(json!({ "progress": 90 })),
        )
        .await,
    )
    .await;
    assert_eq!(patched["data"]["progress"], 50);
}

#[tokio::test]
async fn removing_a_missing_task_is_404() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/contests",
            Some(json!({ "title": "X" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = request(&app, "DELETE", &format!("/api/v1/contests/{id}/tasks/99"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Team members sync the contest's count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn team_member_add_and_remove_track_the_count() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/contests",
            Some(json!({ "title": "Team contest" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let member = json_body(
        request(
            &app,
            "POST",
            &format!("/api/v1/contests/{id}/team-members"),
            Some(json!({ "name": "Ada", "role": "design" })),
        )
        .await,
    )
    .await;
    let member_id = member["data"]["id"].as_i64().unwrap();
    request(
        &app,
        "POST",
        &format!("/api/v1/contests/{id}/team-members"),
        Some(json!({ "name": "Lin" })),
    )
    .await;

    let contest = json_body(request(&app, "GET", &format!("/api/v1/contests/{id}"), None).await).await;
    assert_eq!(contest["data"]["team_members_count"], 2);

    let removed = request(
        &app,
        "DELETE",
        &format!("/api/v1/contests/{id}/team-members/{member_id}"),
        None,
    )
    .await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let contest = json_body(request(&app, "GET", &format!("/api/v1/contests/{id}"), None).await).await;
    assert_eq!(contest["data"]["team_members_count"], 1);
}

// ---------------------------------------------------------------------------
// Files: two-phase upload through multipart
// ---------------------------------------------------------------------------

fn multipart_body(boundary: &str, file_name: &str, content: &str) -> String {
    format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {content}\r\n\
         --{boundary}--\r\n"
    )
}

#[tokio::test]
async fn upload_stores_metadata_and_delete_removes_it() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/contests",
            Some(json!({ "title": "With files" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let boundary = "it-boundary";
    let upload = app
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/contests/{id}/files"))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(multipart_body(boundary, "notes.txt", "hello")))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(upload.status(), StatusCode::CREATED);
    let upload = json_body(upload).await;
    let report = &upload["data"][0];
    assert_eq!(report["ok"], true);
    assert_eq!(report["file"]["name"], "notes.txt");
    assert_eq!(report["file"]["size_bytes"], 5);
    let file_id = report["file"]["id"].as_i64().unwrap();
    let url = report["file"]["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:3000/blobs/"));

    let listed = json_body(
        request(&app, "GET", &format!("/api/v1/contests/{id}/files"), None).await,
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let deleted = request(&app, "DELETE", &format!("/api/v1/files/{file_id}"), None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let listed = json_body(
        request(&app, "GET", &format!("/api/v1/contests/{id}/files"), None).await,
    )
    .await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn prompt_crud_and_link_file_round_trip() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/contests",
            Some(json!({ "title": "Prompted" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let prompt = request(
        &app,
        "POST",
        &format!("/api/v1/contests/{id}/prompts"),
        Some(json!({ "prompt_text": "moody poster, dusk palette", "prompt_type": "image" })),
    )
    .await;
    assert_eq!(prompt.status(), StatusCode::CREATED);
    let prompt = json_body(prompt).await;
    let prompt_id = prompt["data"]["id"].as_i64().unwrap();
    assert_eq!(prompt["data"]["prompt_type"], "image");
    assert!(prompt["data"]["file_id"].is_null());

    // Linking a nonexistent file is rejected.
    let bad_link = request(
        &app,
        "POST",
        &format!("/api/v1/prompts/{prompt_id}/link-file"),
        Some(json!({ "file_id": 999 })),
    )
    .await;
    assert_eq!(bad_link.status(), StatusCode::NOT_FOUND);

    let updated = json_body(
        request(
            &app,
            "PUT",
            &format!("/api/v1/prompts/{prompt_id}"),
            Some(json!({ "ai_model": "imagegen-2" })),
        )
        .await,
    )
    .await;
    assert_eq!(updated["data"]["ai_model"], "imagegen-2");
    assert_eq!(updated["data"]["prompt_text"], "moody poster, dusk palette");

    let deleted = request(&app, "DELETE", &format!("/api/v1/prompts/{prompt_id}"), None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[tokio::test]
async fn one_result_per_contest() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/contests",
            Some(json!({ "title": "Judged" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    // No result yet: empty state, not an error.
    let empty = request(&app, "GET", &format!("/api/v1/contests/{id}/result"), None).await;
    assert_eq!(empty.status(), StatusCode::OK);
    assert!(json_body(empty).await["data"].is_null());

    let announcement = Utc::now().to_rfc3339();
    let first = request(
        &app,
        "POST",
        &format!("/api/v1/contests/{id}/result"),
        Some(json!({ "status": "winner", "announcement_date": announcement })),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = request(
        &app,
        "POST",
        &format!("/api/v1/contests/{id}/result"),
        Some(json!({ "status": "honorable_mention", "announcement_date": announcement })),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let fetched = json_body(
        request(&app, "GET", &format!("/api/v1/contests/{id}/result"), None).await,
    )
    .await;
    assert_eq!(fetched["data"]["status"], "winner");
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mark_read_is_idempotent() {
    let app = build_test_app();

    let created = json_body(
        request(
            &app,
            "POST",
            "/api/v1/notifications",
            Some(json!({ "title": "Deadline soon", "message": "3 days left" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["kind"], "info");
    assert_eq!(created["data"]["is_read"], false);

    let count = json_body(request(&app, "GET", "/api/v1/notifications/unread-count", None).await).await;
    assert_eq!(count["data"]["count"], 1);

    let first = request(&app, "POST", &format!("/api/v1/notifications/{id}/read"), None).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    // Second mark of the same notification: still a success.
    let second = request(&app, "POST", &format!("/api/v1/notifications/{id}/read"), None).await;
    assert_eq!(second.status(), StatusCode::NO_CONTENT);

    let count = json_body(request(&app, "GET", "/api/v1/notifications/unread-count", None).await).await;
    assert_eq!(count["data"]["count"], 0);

    let missing = request(&app, "POST", "/api/v1/notifications/999/read", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unread_filter_and_read_all() {
    let app = build_test_app();

    for title in ["a", "b", "c"] {
        request(
            &app,
            "POST",
            "/api/v1/notifications",
            Some(json!({ "title": title, "message": "" })),
        )
        .await;
    }

    let all = json_body(request(&app, "GET", "/api/v1/notifications", None).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
    // Newest first.
    assert_eq!(all["data"][0]["title"], "c");

    let marked = json_body(request(&app, "POST", "/api/v1/notifications/read-all", None).await).await;
    assert_eq!(marked["data"]["marked_read"], 3);

    let unread = json_body(
        request(&app, "GET", "/api/v1/notifications?unread_only=true", None).await,
    )
    .await;
    assert!(unread["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Auth edge: a bad token never demotes to local storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_bearer_token_is_rejected_not_demoted() {
    let app = build_test_app();

    let response = app
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/contests")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// AI endpoints: missing key is a distinct, pre-network failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ai_calls_without_a_key_return_missing_api_key() {
    let app = build_test_app();

    let ideas = request(
        &app,
        "POST",
        "/api/v1/ai/ideas",
        Some(json!({ "title": "Eco Hackathon" })),
    )
    .await;
    assert_eq!(ideas.status(), StatusCode::BAD_REQUEST);
    let body = json_body(ideas).await;
    assert_eq!(body["code"], "MISSING_API_KEY");

    let scrape = request(
        &app,
        "POST",
        "/api/v1/ai/scrape",
        Some(json!({ "url": "https://example.com/contest" })),
    )
    .await;
    assert_eq!(scrape.status(), StatusCode::BAD_REQUEST);
    let body = json_body(scrape).await;
    assert_eq!(body["code"], "MISSING_API_KEY");
}
