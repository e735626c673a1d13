use crate::error::{ErrorResponse, HttpAppError};
use crate::services::UploadVideoRequest;
use crate::state::AppState;
use crate::utils::upload::extract_video_upload;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use cliphub_core::models::VideoResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/videos",
    tag = "videos",
    request_body(content = String, content_type = "multipart/form-data",
        description = "Fields: file (the video), title, description, tags (comma-separated), uploaded_by"),
    responses(
        (status = 200, description = "Video uploaded successfully", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 502, description = "Object store unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = extract_video_upload(multipart).await?;

    let record = state
        .lifecycle
        .upload_video(UploadVideoRequest {
            data: form.data,
            content_type: form.content_type,
            title: form.title,
            description: form.description,
            raw_tags: form.tags,
            owner: form.uploaded_by,
        })
        .await?;

    Ok(Json(VideoResponse::from(record)))
}
