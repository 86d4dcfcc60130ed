//! Student handlers

use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use kip_core::{KipError, StudentListResponse, StudentStatus};

use super::ApiError;

pub async fn status(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<StudentStatus>, ApiError> {
    match state.students.lookup(&student_id).await {
        Ok(status) => Ok(Json(status)),
        Err(KipError::Validation(error)) => Err(ApiError::bad_request(error, None).with_exists_flag()),
        Err(e) => Err(
            ApiError::internal("Terjadi kesalahan saat memeriksa Student ID", e).with_exists_flag(),
        ),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<StudentListResponse>, ApiError> {
    state
        .students
        .list_registered()
        .await
        .map(|students| Json(StudentListResponse::new(students)))
        .map_err(|e| ApiError::internal("Terjadi kesalahan saat mengambil data mahasiswa", e))
}
