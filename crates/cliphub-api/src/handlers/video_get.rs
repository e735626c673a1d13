use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use cliphub_core::models::VideoResponse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserQuery {
    /// Opaque user identity to check against the video's owner
    #[serde(default)]
    pub user: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OwnershipResponse {
    pub is_owner: bool,
}

#[utoipa::path(
    get,
    path = "/api/v0/videos/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = VideoResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(video_id = %id, operation = "get_video"))]
pub async fn get_video(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state.lifecycle.get_video(id).await?;
    Ok(Json(VideoResponse::from(video)))
}

#[utoipa::path(
    get,
    path = "/api/v0/videos",
    tag = "videos",
    responses(
        (status = 200, description = "List of videos, newest first", body = Vec<VideoResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.lifecycle.get_all_videos().await?;
    let responses: Vec<VideoResponse> = videos.into_iter().map(VideoResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v0/users/{user}/videos",
    tag = "videos",
    params(
        ("user" = String, Path, description = "Owner identity")
    ),
    responses(
        (status = 200, description = "Videos uploaded by the user, newest first", body = Vec<VideoResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_user_videos(
    Path(user): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.lifecycle.get_videos_by_user(&user).await?;
    let responses: Vec<VideoResponse> = videos.into_iter().map(VideoResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/v0/videos/{id}/is-owner",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID"),
        UserQuery
    ),
    responses(
        (status = 200, description = "Ownership check result", body = OwnershipResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn is_owner(
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let is_owner = state.lifecycle.is_owner(id, &query.user).await?;
    Ok(Json(OwnershipResponse { is_owner }))
}
