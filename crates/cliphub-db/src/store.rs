//! Video record store abstraction.
//!
//! The record store is the single source of truth for which videos exist;
//! the object store holds no authoritative state. Updates are conditional on
//! the record's revision so that concurrent read-modify-write cycles cannot
//! silently drop each other's changes.

use async_trait::async_trait;
use cliphub_core::models::{NewVideo, VideoRecord};
use cliphub_core::AppError;
use uuid::Uuid;

/// Persistence contract for video records.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Persist a new record. The store assigns `id`, `uploaded_at`, and
    /// revision 0; `likes` and `comments` start empty.
    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError>;

    /// Fetch a record by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError>;

    /// All records uploaded by `owner`, newest first.
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<VideoRecord>, AppError>;

    /// All records, newest first.
    async fn find_all(&self) -> Result<Vec<VideoRecord>, AppError>;

    /// Conditionally overwrite the record: succeeds only if the stored
    /// revision equals `video.revision`, and returns the record with the
    /// incremented revision. Fails with `AppError::Conflict` when another
    /// writer got there first, and `AppError::NotFound` when the record no
    /// longer exists. `id`, `media_url`, `object_id`, `owner`, and
    /// `uploaded_at` are never modified by an update.
    async fn update(&self, video: &VideoRecord) -> Result<VideoRecord, AppError>;

    /// Delete a record. Fails with `AppError::NotFound` when absent.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
