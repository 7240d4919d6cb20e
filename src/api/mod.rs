pub mod health;
pub mod index;
pub mod students;

use crate::db::Repository;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/api/students",
            get(students::list_students).post(students::create_student),
        )
        .route("/api/students/search", get(students::search_students))
        .route(
            "/api/students/:id",
            put(students::update_student).delete(students::delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
