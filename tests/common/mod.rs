#![allow(dead_code)]

use axum::http::StatusCode;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use student_records::api::{self, AppState};
use student_records::{create_pool, init_schema, Config, DatabaseSettings, Repository};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub struct TestApp {
    pub app: axum::Router,
    pub repo: Arc<Repository>,
    _temp: TempDir,
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        database: DatabaseSettings::File {
            dir: temp_dir.path().to_path_buf(),
            name: "test".to_string(),
        },
        max_connections: 2,
    }
}

pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let pool = create_pool(&test_config(&temp_dir)).expect("create_pool failed");
    init_schema(&pool).await.expect("init_schema failed");
    let repo = Arc::new(Repository::new(pool));
    let app = api::create_router(AppState::new(repo.clone()));

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

pub async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body)
}

pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = request(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
