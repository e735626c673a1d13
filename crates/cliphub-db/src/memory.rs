//! In-memory implementation of the video record store.
//!
//! Used by tests and local development. Semantics match `PgVideoStore`,
//! including the revision compare-and-swap, plus failure injection for
//! exercising the lifecycle manager's compensation paths.

use async_trait::async_trait;
use chrono::Utc;
use cliphub_core::models::{NewVideo, VideoRecord};
use cliphub_core::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::store::VideoStore;

#[derive(Default)]
pub struct MemoryVideoStore {
    videos: Mutex<HashMap<Uuid, VideoRecord>>,
    fail_inserts: AtomicBool,
    fail_updates: AtomicBool,
}

impl MemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `insert` calls fail with a persistence error.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `update` calls fail with a persistence error.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of stored records (for test assertions)
    pub fn record_count(&self) -> usize {
        self.videos.lock().unwrap().len()
    }

    fn persistence_error(what: &str) -> AppError {
        AppError::Database(sqlx::Error::Protocol(format!(
            "injected {} failure",
            what
        )))
    }

    fn sorted_newest_first(mut records: Vec<VideoRecord>) -> Vec<VideoRecord> {
        records.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        records
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(Self::persistence_error("insert"));
        }

        let record = VideoRecord {
            id: Uuid::new_v4(),
            title: video.title,
            description: video.description,
            tags: video.tags,
            media_url: video.media_url,
            object_id: video.object_id,
            owner: video.owner,
            uploaded_at: Utc::now(),
            likes: Default::default(),
            comments: Vec::new(),
            revision: 0,
        };

        self.videos
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        Ok(self.videos.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<VideoRecord>, AppError> {
        let records: Vec<VideoRecord> = self
            .videos
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.owner == owner)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(records))
    }

    async fn find_all(&self) -> Result<Vec<VideoRecord>, AppError> {
        let records: Vec<VideoRecord> = self.videos.lock().unwrap().values().cloned().collect();
        Ok(Self::sorted_newest_first(records))
    }

    async fn update(&self, video: &VideoRecord) -> Result<VideoRecord, AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(Self::persistence_error("update"));
        }

        let mut videos = self.videos.lock().unwrap();
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        if stored.revision != video.revision {
            return Err(AppError::Conflict(format!(
                "Video {} was modified concurrently",
                video.id
            )));
        }

        stored.title = video.title.clone();
        stored.description = video.description.clone();
        stored.tags = video.tags.clone();
        stored.likes = video.likes.clone();
        stored.comments = video.comments.clone();
        stored.revision += 1;

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.videos
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }
}
