use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::UpdateVideoRequest;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use cliphub_core::models::VideoResponse;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVideoBody {
    /// New title; absent or blank leaves the current title unchanged
    pub title: Option<String>,
    /// New description; absent or blank leaves the current description unchanged
    pub description: Option<String>,
    /// New comma-separated tag list; absent or blank leaves the current tags unchanged
    pub tags: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/v0/videos/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = UpdateVideoBody,
    responses(
        (status = 200, description = "Video updated", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(video_id = %id, operation = "update_video"))]
pub async fn update_video(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UpdateVideoBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state
        .lifecycle
        .update_video(
            id,
            UpdateVideoRequest {
                title: body.title,
                description: body.description,
                tags: body.tags,
            },
        )
        .await?;

    Ok(Json(VideoResponse::from(record)))
}
