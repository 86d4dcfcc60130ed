//! Discussion handlers

use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use kip_core::{
    AnswerRequest, DiscussionCreatedResponse, DiscussionListResponse, KipError, MessageResponse,
    NewDiscussion,
};

use tracing::debug;

use super::ApiError;

const MSG_NOT_FOUND: &str = "Diskusi tidak ditemukan";
const MSG_EMPTY_QUESTION: &str = "Pertanyaan tidak boleh kosong";
const MSG_EMPTY_ANSWER: &str = "Jawaban tidak boleh kosong";

/// A request without a JSON body reads as an empty one; an unreadable body is a 400.
fn body_or_default<T: Default>(
    payload: Result<Json<T>, JsonRejection>,
    error: &str,
    message: &str,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::bad_request(error, Some(message)))
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<DiscussionListResponse>, ApiError> {
    state
        .discussions
        .list()
        .await
        .map(|discussions| Json(DiscussionListResponse::new(discussions)))
        .map_err(|e| ApiError::internal("Terjadi kesalahan saat mengambil data diskusi", e))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewDiscussion>, JsonRejection>,
) -> Result<(StatusCode, Json<DiscussionCreatedResponse>), ApiError> {
    let req = body_or_default(payload, "Question is required", MSG_EMPTY_QUESTION)?;

    match state.discussions.create(req).await {
        Ok(discussion) => Ok((
            StatusCode::CREATED,
            Json(DiscussionCreatedResponse {
                success: true,
                message: "Pertanyaan berhasil dikirim".to_string(),
                discussion,
            }),
        )),
        Err(KipError::Validation(error)) => {
            Err(ApiError::bad_request(error, Some(MSG_EMPTY_QUESTION)))
        }
        Err(e) => Err(ApiError::internal(
            "Terjadi kesalahan saat mengirim pertanyaan",
            e,
        )),
    }
}

pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let req = body_or_default(payload, "Answer is required", MSG_EMPTY_ANSWER)?;

    match state.discussions.answer(&id, req.answer.as_deref()).await {
        Ok(()) => Ok(Json(MessageResponse::ok("Jawaban berhasil ditambahkan"))),
        Err(KipError::Validation(error)) => {
            Err(ApiError::bad_request(error, Some(MSG_EMPTY_ANSWER)))
        }
        Err(KipError::NotFound(_)) => Err(ApiError::not_found(
            "Discussion not found",
            Some(MSG_NOT_FOUND),
        )),
        Err(e) => Err(ApiError::internal(
            "Terjadi kesalahan saat menambahkan jawaban",
            e,
        )),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    match state.discussions.delete(&id).await {
        Ok(()) => Ok(Json(MessageResponse::ok("Diskusi berhasil dihapus"))),
        Err(KipError::NotFound(_)) => Err(ApiError::not_found(
            "Discussion not found",
            Some(MSG_NOT_FOUND),
        )),
        Err(e) => Err(ApiError::internal(
            "Terjadi kesalahan saat menghapus diskusi",
            e,
        )),
    }
}
