use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{Student, StudentPayload};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i64,
}

pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.repo.list_students().await?;
    Ok(Json(students))
}

pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(payload) = payload?;
    let draft = payload.into_new_student()?;

    let id = state.repo.insert_student(&draft).await?;
    tracing::info!(id, student_id = ?draft.student_id, "Student added");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Student added successfully",
            id,
        }),
    ))
}

/// Full overwrite: fields missing from the body are written as defaults,
/// not preserved.
pub async fn update_student(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    state
        .repo
        .update_student(id, &payload.into_replacement())
        .await?;
    tracing::info!(id, "Student updated");

    Ok(Json(MessageResponse {
        message: "Student updated successfully",
    }))
}

pub async fn delete_student(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;

    state.repo.delete_student(id).await?;
    tracing::info!(id, "Student deleted");

    Ok(Json(MessageResponse {
        message: "Student deleted successfully",
    }))
}

pub async fn search_students(
    Query(params): Query<SearchQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.repo.search_students(&params.query).await?;
    Ok(Json(students))
}
