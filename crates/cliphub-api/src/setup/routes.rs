//! Route configuration and setup.

use crate::api_doc::ApiDoc;
use crate::constants;
use crate::handlers::{engagement, video_delete, video_get, video_update, video_upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use cliphub_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Headroom for multipart framing and text fields on top of the raw file
/// size limit.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let api = Router::new()
        .route(
            "/videos",
            post(video_upload::upload_video).get(video_get::list_videos),
        )
        .route(
            "/videos/{id}",
            get(video_get::get_video)
                .patch(video_update::update_video)
                .delete(video_delete::delete_video),
        )
        .route("/videos/{id}/is-owner", get(video_get::is_owner))
        .route("/videos/{id}/like", post(engagement::like_video))
        .route("/videos/{id}/unlike", post(engagement::unlike_video))
        .route(
            "/videos/{id}/comments",
            post(engagement::add_comment).get(engagement::get_comments),
        )
        .route("/users/{user}/videos", get(video_get::list_user_videos))
        .route("/users/{user}/liked", get(engagement::liked_videos));

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let body_limit = config.max_video_size_bytes() + UPLOAD_OVERHEAD_BYTES;

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/openapi.json", get(openapi_spec))
        .nest(constants::API_PREFIX, api)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::PATCH, Method::DELETE];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<_, _>>()?;
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(methods)
            .allow_headers(Any)
    };

    Ok(cors)
}
