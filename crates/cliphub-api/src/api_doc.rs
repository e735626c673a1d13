//! OpenAPI documentation.
//!
//! All endpoints are versioned under `/api/v0/` (`crate::constants::API_PREFIX`).

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use cliphub_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cliphub API",
        version = "0.1.0",
        description = "Video lifecycle and engagement API (v0). Uploads store media in an object store (S3 or local) and metadata in PostgreSQL, keeping the two consistent across partial failures. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Videos
        handlers::video_upload::upload_video,
        handlers::video_get::get_video,
        handlers::video_get::list_videos,
        handlers::video_get::list_user_videos,
        handlers::video_get::is_owner,
        handlers::video_update::update_video,
        handlers::video_delete::delete_video,
        // Engagement
        handlers::engagement::like_video,
        handlers::engagement::unlike_video,
        handlers::engagement::add_comment,
        handlers::engagement::get_comments,
        handlers::engagement::liked_videos,
    ),
    components(schemas(
        models::VideoResponse,
        models::Comment,
        handlers::video_get::OwnershipResponse,
        handlers::video_update::UpdateVideoBody,
        handlers::engagement::CommentBody,
        error::ErrorResponse,
    )),
    tags(
        (name = "videos", description = "Video lifecycle operations"),
        (name = "engagement", description = "Likes and comments")
    )
)]
pub struct ApiDoc;
