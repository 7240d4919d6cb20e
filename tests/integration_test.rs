mod common;

use axum::http::StatusCode;
use common::{request, request_json, setup_test_app};

#[tokio::test]
async fn test_health_endpoint() {
    let test_app = setup_test_app().await;

    let (status, body) = request_json(&test_app.app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let test_app = setup_test_app().await;

    let (status, body) = request_json(&test_app.app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_index_serves_html() {
    let test_app = setup_test_app().await;

    let (status, body) = request(&test_app.app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);

    let body_str = String::from_utf8(body).unwrap();
    assert!(body_str.contains("<title>Student Records</title>"));
}

#[tokio::test]
async fn test_unreachable_database_reports_connection_failure() {
    use std::sync::Arc;
    use student_records::api::{self, AppState};
    use student_records::{create_pool, DatabaseSettings, Repository};

    let temp_dir = tempfile::TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let mut config = common::test_config(&temp_dir);
    config.database = DatabaseSettings::Url(format!("sqlite://{}/test.db", blocker.display()));
    let pool = create_pool(&config).expect("lazy pool should build");
    let app = api::create_router(AppState::new(Arc::new(Repository::new(pool))));

    let (status, body) = request_json(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database connection failed");

    let (status, body) = request_json(&app, "GET", "/api/students", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database connection failed");

    // blank search never reaches the database
    let (status, body) = request_json(&app, "GET", "/api/students/search?query=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}
