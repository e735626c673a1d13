//! Video lifecycle operations: upload, update, delete, and reads.
//!
//! Keeps handler logic thin and allows unit testing without HTTP.
//!
//! Upload and delete coordinate two stores that cannot be updated
//! atomically together. The rules that keep them consistent:
//!
//! - upload writes the object store first, then the metadata store; if the
//!   metadata write fails, the just-written object is removed again
//!   (best-effort, attempted once).
//! - delete removes the object first and refuses to drop the metadata record
//!   while the object removal has not succeeded, so a failed delete can be
//!   retried and no record ever points at media the caller believes deleted.

use cliphub_core::models::{parse_tags, NewVideo, VideoRecord};
use cliphub_core::{validation, AppError};
use cliphub_db::{mutate_video, VideoStore};
use cliphub_storage::{keys, Storage};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// A validated-and-parsed upload, transport-agnostic.
#[derive(Debug)]
pub struct UploadVideoRequest {
    pub data: Vec<u8>,
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub raw_tags: String,
    pub owner: String,
}

/// Partial update of a video's metadata. Fields that are absent or empty
/// after trimming are left untouched.
#[derive(Debug, Default)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
}

/// Service for the video lifecycle (create, read, update, delete).
#[derive(Clone)]
pub struct VideoLifecycleService {
    store: Arc<dyn VideoStore>,
    storage: Arc<dyn Storage>,
    max_video_size_bytes: usize,
    storage_timeout: Duration,
    mutation_retry_limit: u32,
}

impl VideoLifecycleService {
    pub fn new(
        store: Arc<dyn VideoStore>,
        storage: Arc<dyn Storage>,
        max_video_size_bytes: usize,
        storage_timeout: Duration,
        mutation_retry_limit: u32,
    ) -> Self {
        Self {
            store,
            storage,
            max_video_size_bytes,
            storage_timeout,
            mutation_retry_limit,
        }
    }

    /// Upload a video: validate, store the media, persist the record.
    ///
    /// Validation happens before any external call, so a rejected upload has
    /// zero side effects. The object id is chosen before the object-store
    /// write; a timed-out write is compensated against that id because the
    /// write may still have landed.
    pub async fn upload_video(
        &self,
        request: UploadVideoRequest,
    ) -> Result<VideoRecord, AppError> {
        validation::validate_video_file(
            &request.data,
            &request.content_type,
            self.max_video_size_bytes,
        )?;
        let title = validation::required_text("title", &request.title)?;
        let description = validation::required_text("description", &request.description)?;
        let owner = validation::required_text("uploaded_by", &request.owner)?;
        let tags = parse_tags(&request.raw_tags);

        let object_id = keys::video_object_id(Uuid::new_v4(), &request.content_type);
        let size = request.data.len();

        tracing::info!(
            object_id = %object_id,
            size_bytes = size,
            owner = %owner,
            "Uploading video to object store"
        );

        let put = self
            .storage
            .put_object(&object_id, &request.content_type, request.data);
        let media_url = match tokio::time::timeout(self.storage_timeout, put).await {
            Ok(Ok(url)) => url,
            Ok(Err(e)) => {
                return Err(AppError::Storage(format!("Failed to store video: {}", e)));
            }
            Err(_) => {
                // Outcome unknown: the write may have landed after the deadline.
                self.compensate_object(&object_id).await;
                return Err(AppError::Storage(format!(
                    "Object store write timed out after {}s",
                    self.storage_timeout.as_secs()
                )));
            }
        };

        let video = NewVideo {
            title,
            description,
            tags,
            media_url,
            object_id: object_id.clone(),
            owner,
        };

        match self.store.insert(video).await {
            Ok(record) => {
                tracing::info!(video_id = %record.id, object_id = %object_id, "Video uploaded");
                Ok(record)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    object_id = %object_id,
                    "Metadata insert failed after object store write, compensating"
                );
                self.compensate_object(&object_id).await;
                Err(e)
            }
        }
    }

    /// Best-effort removal of an object whose record was never persisted.
    /// A failure here is logged, not surfaced: it must not mask the error
    /// that triggered the compensation.
    async fn compensate_object(&self, object_id: &str) {
        if let Err(e) = self.storage.remove_object(object_id).await {
            tracing::warn!(
                error = %e,
                object_id = %object_id,
                "Compensating delete failed; object may be orphaned"
            );
        }
    }

    /// Apply a metadata-only update. No object-store interaction;
    /// `media_url`, `object_id`, `owner`, likes, and comments are untouched.
    pub async fn update_video(
        &self,
        id: Uuid,
        request: UpdateVideoRequest,
    ) -> Result<VideoRecord, AppError> {
        let title = validation::optional_text(request.title.as_deref());
        let description = validation::optional_text(request.description.as_deref());
        let tags = validation::optional_text(request.tags.as_deref()).map(|raw| parse_tags(&raw));

        mutate_video(
            self.store.as_ref(),
            id,
            self.mutation_retry_limit,
            move |video| {
                if let Some(ref t) = title {
                    video.title = t.clone();
                }
                if let Some(ref d) = description {
                    video.description = d.clone();
                }
                if let Some(ref t) = tags {
                    video.tags = t.clone();
                }
            },
        )
        .await
    }

    /// Delete a video: object store first, then the metadata record.
    ///
    /// If the object removal fails the record is left in place and the call
    /// fails, so the delete can be retried; the reverse order would leave a
    /// record pointing at media that no longer exists.
    pub async fn delete_video(&self, id: Uuid) -> Result<(), AppError> {
        let video = self.get_video(id).await?;

        let removal = self.storage.remove_object(&video.object_id);
        match tokio::time::timeout(self.storage_timeout, removal).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(AppError::Storage(format!(
                    "Failed to remove video media: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(AppError::Storage(format!(
                    "Object store removal timed out after {}s",
                    self.storage_timeout.as_secs()
                )));
            }
        }

        self.store.delete(id).await?;

        tracing::info!(video_id = %id, object_id = %video.object_id, "Video deleted");
        Ok(())
    }

    /// Fetch a video by id.
    pub async fn get_video(&self, id: Uuid) -> Result<VideoRecord, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    /// All videos, newest first.
    pub async fn get_all_videos(&self) -> Result<Vec<VideoRecord>, AppError> {
        self.store.find_all().await
    }

    /// Videos uploaded by `owner`, newest first.
    pub async fn get_videos_by_user(&self, owner: &str) -> Result<Vec<VideoRecord>, AppError> {
        self.store.find_by_owner(owner).await
    }

    /// Whether `user` owns the video. Case-sensitive exact match.
    pub async fn is_owner(&self, id: Uuid, user: &str) -> Result<bool, AppError> {
        let video = self.get_video(id).await?;
        Ok(video.owner == user)
    }
}
