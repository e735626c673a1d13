//! Test helpers: build AppState and router for integration tests.
//!
//! The router runs against the in-memory record store and object-store
//! double, so these tests need no database or cloud credentials.
//! Run from workspace root: `cargo test -p cliphub-api`.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use cliphub_api::services::{EngagementService, VideoLifecycleService};
use cliphub_api::setup::routes;
use cliphub_api::state::AppState;
use cliphub_core::{BaseConfig, Config, StorageBackend, VideoServiceConfig};
use cliphub_db::{MemoryVideoStore, VideoStore};
use cliphub_storage::test_helpers::MemoryStorage;
use std::sync::Arc;
use std::time::Duration;

/// Upload size limit used by tests (small enough to exercise the cap).
pub const MAX_TEST_VIDEO_BYTES: usize = 1024 * 1024;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", cliphub_api::constants::API_PREFIX, path)
}

/// Test application: server plus handles to the underlying doubles.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryVideoStore>,
    pub storage: Arc<MemoryStorage>,
}

/// Setup a test app with in-memory store and storage.
pub async fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryVideoStore::new());
    let storage = Arc::new(MemoryStorage::new());
    let config = create_test_config();

    let lifecycle = VideoLifecycleService::new(
        store.clone() as Arc<dyn VideoStore>,
        storage.clone(),
        MAX_TEST_VIDEO_BYTES,
        Duration::from_secs(5),
        3,
    );
    let engagement = EngagementService::new(store.clone() as Arc<dyn VideoStore>, 3);

    let state = Arc::new(AppState {
        config: config.clone(),
        lifecycle,
        engagement,
    });

    let router = routes::setup_routes(&config, state)
        .await
        .expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        store,
        storage,
    }
}

fn create_test_config() -> Config {
    Config(Box::new(VideoServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 5,
            db_timeout_seconds: 5,
            environment: "test".to_string(),
        },
        database_url: "postgresql://localhost/unused".to_string(),
        storage_backend: Some(StorageBackend::Local),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: Some("/tmp/unused".to_string()),
        local_storage_base_url: Some("http://localhost:4000/media".to_string()),
        max_video_size_bytes: MAX_TEST_VIDEO_BYTES,
        storage_timeout_secs: 5,
        mutation_retry_limit: 3,
    }))
}

/// Minimal stand-in for video bytes.
pub fn fake_mp4() -> Vec<u8> {
    b"\x00\x00\x00\x18ftypmp42fake video payload".to_vec()
}

/// Build a complete, valid upload form.
pub fn upload_form(title: &str, description: &str, tags: &str, uploaded_by: &str) -> MultipartForm {
    upload_form_with_file(title, description, tags, uploaded_by, fake_mp4(), "video/mp4")
}

/// Build an upload form with explicit file bytes and content type.
pub fn upload_form_with_file(
    title: &str,
    description: &str,
    tags: &str,
    uploaded_by: &str,
    data: Vec<u8>,
    content_type: &str,
) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(data).file_name("clip.mp4").mime_type(content_type),
        )
        .add_text("title", title)
        .add_text("description", description)
        .add_text("tags", tags)
        .add_text("uploaded_by", uploaded_by)
}
