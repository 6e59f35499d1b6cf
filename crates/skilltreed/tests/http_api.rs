//! End-to-end tests for the HTTP API, driving the router in-process.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use skilltree_common::LedgerStore;
use skilltreed::catalog;
use skilltreed::server::{app, AppState};
use std::sync::Arc;
use tower::ServiceExt;

// Seeded by catalog::default_catalog: 3 lessons, 300 XP reward.
const COURSE: &str = "net-fundamentals";

fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::open(&dir.path().join("ledger.db")).unwrap();
    store.seed_courses(&catalog::default_catalog()).unwrap();
    (app(Arc::new(AppState::new(store))), dir)
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    // Error responses carry a plain-text message, not JSON.
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn register(app: &Router, email: &str) {
    let (status, _) = request(
        app,
        "POST",
        "/v1/accounts/register",
        Some(json!({"email": email, "display_name": "Test"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn register_normalizes_and_rejects_duplicates() {
    let (app, _dir) = test_app();

    let (status, body) = request(
        &app,
        "POST",
        "/v1/accounts/register",
        Some(json!({"email": "  Alice@Example.COM "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["xp"], 0);
    assert_eq!(body["numeric_level"], 1);
    assert_eq!(body["rank"], "Novice");

    let (status, _) = request(
        &app,
        "POST",
        "/v1/accounts/register",
        Some(json!({"email": "alice@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = request(
        &app,
        "POST",
        "/v1/accounts/register",
        Some(json!({"email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lesson_completion_awards_once() {
    let (app, _dir) = test_app();
    register(&app, "alice@example.com").await;

    let body = json!({"email": "alice@example.com", "course_id": COURSE, "lesson_number": 1});

    let (status, first) = request(&app, "POST", "/v1/courses/complete-lesson", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["xp_added"], 100);
    assert_eq!(first["new_level"], 2);
    assert_eq!(first["already_completed"], false);
    assert_eq!(first["progress_pct"], 33);

    let (status, second) = request(&app, "POST", "/v1/courses/complete-lesson", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["xp_added"], 0);
    assert_eq!(second["already_completed"], true);

    let (status, progress) = request(
        &app,
        "GET",
        "/v1/accounts/progress?email=alice@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress["xp"], 100);
    assert_eq!(progress["level"], 2);
    assert_eq!(progress["xp_into_level"], 0);
    assert_eq!(progress["xp_to_next"], 200);
}

#[tokio::test]
async fn instant_complete_blocks_double_grants() {
    let (app, _dir) = test_app();
    register(&app, "bob@example.com").await;

    let (status, done) = request(
        &app,
        "POST",
        "/v1/courses/complete-course",
        Some(json!({"email": "bob@example.com", "course_id": COURSE})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["xp_added"], 300);
    assert_eq!(done["completed"], true);

    // Lessons of a completed course no longer grant XP.
    let (_, lesson) = request(
        &app,
        "POST",
        "/v1/courses/complete-lesson",
        Some(json!({"email": "bob@example.com", "course_id": COURSE, "lesson_number": 1})),
    )
    .await;
    assert_eq!(lesson["xp_added"], 0);
    assert_eq!(lesson["already_completed"], true);

    let (_, progress) = request(
        &app,
        "GET",
        "/v1/accounts/progress?email=bob@example.com",
        None,
    )
    .await;
    assert_eq!(progress["xp"], 300);
}

#[tokio::test]
async fn unknown_account_and_course_are_distinct_404s() {
    let (app, _dir) = test_app();
    register(&app, "carol@example.com").await;

    let (status, body) = request(
        &app,
        "GET",
        "/v1/accounts/progress?email=ghost@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.as_str().unwrap().contains("No account"));

    let (status, body) = request(
        &app,
        "POST",
        "/v1/courses/complete-lesson",
        Some(json!({"email": "carol@example.com", "course_id": "ghost-course", "lesson_number": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.as_str().unwrap().contains("No active course"));
}

#[tokio::test]
async fn activity_feed_lists_awards_newest_first() {
    let (app, _dir) = test_app();
    register(&app, "dave@example.com").await;

    for (route, extra) in [
        ("complete-lesson", json!({"lesson_number": 1})),
        ("complete-quiz", json!({"lesson_number": 1})),
        ("complete-challenge", json!({"lesson_number": 1})),
    ] {
        let mut body = json!({"email": "dave@example.com", "course_id": COURSE});
        body.as_object_mut()
            .unwrap()
            .extend(extra.as_object().unwrap().clone());
        let (status, _) = request(&app, "POST", &format!("/v1/courses/{route}"), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = request(
        &app,
        "GET",
        "/v1/activity?email=dave@example.com&limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action"], "Challenge Completed");
    assert_eq!(entries[0]["xp_awarded"], 15);
    assert_eq!(entries[1]["action"], "Quiz Completed");
}

#[tokio::test]
async fn course_list_and_status_track_progress() {
    let (app, _dir) = test_app();
    register(&app, "erin@example.com").await;

    let (status, _) = request(
        &app,
        "POST",
        "/v1/courses/start",
        Some(json!({"email": "erin@example.com", "course_id": COURSE})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    request(
        &app,
        "POST",
        "/v1/courses/complete-lesson",
        Some(json!({"email": "erin@example.com", "course_id": COURSE, "lesson_number": 2})),
    )
    .await;

    let (_, list) = request(&app, "GET", "/v1/courses?email=erin@example.com", None).await;
    let course = list["courses"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == COURSE)
        .unwrap();
    assert_eq!(course["progress_pct"], 33);
    assert_eq!(course["completed"], false);

    let (_, status_body) = request(
        &app,
        "GET",
        &format!("/v1/courses/status?email=erin@example.com&course_id={COURSE}"),
        None,
    )
    .await;
    assert_eq!(status_body["lessons"], json!([2]));
    assert_eq!(status_body["quizzes"], json!([]));
}

#[tokio::test]
async fn health_reports_version() {
    let (app, _dir) = test_app();
    let (status, body) = request(&app, "GET", "/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
