use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use cliphub_core::models::{Comment, VideoResponse};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserQuery {
    /// Opaque user identity performing the action
    #[serde(default)]
    pub user: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentBody {
    /// Opaque identity of the comment author
    pub author: String,
    pub text: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/videos/{id}/like",
    tag = "engagement",
    params(
        ("id" = Uuid, Path, description = "Video ID"),
        UserQuery
    ),
    responses(
        (status = 200, description = "Updated video; liking twice is a no-op", body = VideoResponse),
        (status = 400, description = "Missing user identity", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn like_video(
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.engagement.like_video(id, &query.user).await?;
    Ok(Json(VideoResponse::from(record)))
}

#[utoipa::path(
    post,
    path = "/api/v0/videos/{id}/unlike",
    tag = "engagement",
    params(
        ("id" = Uuid, Path, description = "Video ID"),
        UserQuery
    ),
    responses(
        (status = 200, description = "Updated video; unliking a non-liked video is a no-op", body = VideoResponse),
        (status = 400, description = "Missing user identity", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn unlike_video(
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.engagement.unlike_video(id, &query.user).await?;
    Ok(Json(VideoResponse::from(record)))
}

#[utoipa::path(
    post,
    path = "/api/v0/videos/{id}/comments",
    tag = "engagement",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = CommentBody,
    responses(
        (status = 200, description = "Updated video with the appended comment", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn add_comment(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CommentBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state
        .engagement
        .add_comment(id, &body.author, &body.text)
        .await?;
    Ok(Json(VideoResponse::from(record)))
}

#[utoipa::path(
    get,
    path = "/api/v0/videos/{id}/comments",
    tag = "engagement",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Comments in insertion order (empty list when none)", body = Vec<Comment>),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_comments(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let comments = state.engagement.get_comments(id).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    get,
    path = "/api/v0/users/{user}/liked",
    tag = "engagement",
    params(
        ("user" = String, Path, description = "User identity")
    ),
    responses(
        (status = 200, description = "Videos the user has liked", body = Vec<VideoResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn liked_videos(
    Path(user): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.engagement.get_liked_videos(&user).await?;
    let responses: Vec<VideoResponse> = videos.into_iter().map(VideoResponse::from).collect();
    Ok(Json(responses))
}
