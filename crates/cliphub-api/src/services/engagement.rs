//! Engagement operations: likes and comments on a shared video record.
//!
//! Every mutation is a fetch-modify-conditional-write through
//! `mutate_video`, so two concurrent likes or comments on the same record
//! cannot drop each other (the original fetch-then-overwrite design lost
//! updates under exactly that interleaving).

use chrono::Utc;
use cliphub_core::models::{Comment, VideoRecord};
use cliphub_core::{validation, AppError};
use cliphub_db::{mutate_video, VideoStore};
use std::sync::Arc;
use uuid::Uuid;

/// Service for like/comment mutations and engagement queries.
#[derive(Clone)]
pub struct EngagementService {
    store: Arc<dyn VideoStore>,
    mutation_retry_limit: u32,
}

impl EngagementService {
    pub fn new(store: Arc<dyn VideoStore>, mutation_retry_limit: u32) -> Self {
        Self {
            store,
            mutation_retry_limit,
        }
    }

    async fn fetch(&self, id: Uuid) -> Result<VideoRecord, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    /// Add `user` to the video's like set. Idempotent: liking an already
    /// liked video is a no-op.
    pub async fn like_video(&self, id: Uuid, user: &str) -> Result<VideoRecord, AppError> {
        let user = validation::required_text("user", user)?;
        mutate_video(
            self.store.as_ref(),
            id,
            self.mutation_retry_limit,
            move |video| {
                video.likes.insert(user.clone());
            },
        )
        .await
    }

    /// Remove `user` from the video's like set. Removing a non-member is a
    /// no-op, not an error.
    pub async fn unlike_video(&self, id: Uuid, user: &str) -> Result<VideoRecord, AppError> {
        let user = validation::required_text("user", user)?;
        mutate_video(
            self.store.as_ref(),
            id,
            self.mutation_retry_limit,
            move |video| {
                video.likes.remove(&user);
            },
        )
        .await
    }

    /// Append a comment to the video's comment log. Comments are never
    /// deduplicated, edited, or removed.
    pub async fn add_comment(
        &self,
        id: Uuid,
        author: &str,
        text: &str,
    ) -> Result<VideoRecord, AppError> {
        let author = validation::required_text("author", author)?;
        let text = validation::required_text("text", text)?;
        mutate_video(
            self.store.as_ref(),
            id,
            self.mutation_retry_limit,
            move |video| {
                video.comments.push(Comment {
                    author: author.clone(),
                    text: text.clone(),
                    created_at: Utc::now(),
                });
            },
        )
        .await
    }

    /// The video's comments in insertion order; empty when none exist.
    pub async fn get_comments(&self, id: Uuid) -> Result<Vec<Comment>, AppError> {
        Ok(self.fetch(id).await?.comments)
    }

    /// All videos liked by `user`. Full scan over the record store; fine at
    /// this scale, an index on like membership would be needed beyond it.
    pub async fn get_liked_videos(&self, user: &str) -> Result<Vec<VideoRecord>, AppError> {
        let videos = self.store.find_all().await?;
        Ok(videos
            .into_iter()
            .filter(|v| v.is_liked_by(user))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliphub_core::models::NewVideo;
    use cliphub_db::MemoryVideoStore;

    async fn fixture() -> (EngagementService, Arc<MemoryVideoStore>, Uuid) {
        let store = Arc::new(MemoryVideoStore::new());
        let record = store
            .insert(NewVideo {
                title: "T".to_string(),
                description: "D".to_string(),
                tags: vec![],
                media_url: "https://media.example.com/videos/x.mp4".to_string(),
                object_id: "videos/x.mp4".to_string(),
                owner: "u1".to_string(),
            })
            .await
            .unwrap();
        let service = EngagementService::new(store.clone(), 3);
        (service, store, record.id)
    }

    #[tokio::test]
    async fn test_like_is_idempotent() {
        let (service, _store, id) = fixture().await;

        let first = service.like_video(id, "u2").await.unwrap();
        assert_eq!(first.likes.len(), 1);

        let second = service.like_video(id, "u2").await.unwrap();
        assert_eq!(second.likes.len(), 1);
        assert!(second.likes.contains("u2"));
    }

    #[tokio::test]
    async fn test_unlike_removes_and_tolerates_non_members() {
        let (service, _store, id) = fixture().await;

        service.like_video(id, "u2").await.unwrap();
        let after = service.unlike_video(id, "u2").await.unwrap();
        assert!(after.likes.is_empty());

        // Non-member unlike is a no-op, not an error.
        let still = service.unlike_video(id, "stranger").await.unwrap();
        assert!(still.likes.is_empty());
    }

    #[tokio::test]
    async fn test_like_missing_video_is_not_found() {
        let (service, _store, _id) = fixture().await;
        let err = service.like_video(Uuid::new_v4(), "u2").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_like_requires_user_identity() {
        let (service, _store, id) = fixture().await;
        let err = service.like_video(id, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_comments_append_in_order() {
        let (service, _store, id) = fixture().await;
        let before = Utc::now();

        service.add_comment(id, "u3", "hi").await.unwrap();
        let record = service.add_comment(id, "u4", "hello").await.unwrap();

        assert_eq!(record.comments.len(), 2);
        assert_eq!(record.comments[0].author, "u3");
        assert_eq!(record.comments[0].text, "hi");
        assert_eq!(record.comments[1].author, "u4");
        assert!(record.comments[0].created_at >= before);

        let comments = service.get_comments(id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "hi");
    }

    #[tokio::test]
    async fn test_comments_are_not_deduplicated() {
        let (service, _store, id) = fixture().await;

        service.add_comment(id, "u3", "same").await.unwrap();
        let record = service.add_comment(id, "u3", "same").await.unwrap();

        assert_eq!(record.comments.len(), 2);
    }

    #[tokio::test]
    async fn test_get_comments_empty_when_none() {
        let (service, _store, id) = fixture().await;
        assert!(service.get_comments(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_liked_videos_scan() {
        let (service, store, id) = fixture().await;
        let other = store
            .insert(NewVideo {
                title: "T2".to_string(),
                description: "D2".to_string(),
                tags: vec![],
                media_url: "https://media.example.com/videos/y.mp4".to_string(),
                object_id: "videos/y.mp4".to_string(),
                owner: "u1".to_string(),
            })
            .await
            .unwrap();

        service.like_video(id, "fan").await.unwrap();
        service.like_video(other.id, "fan").await.unwrap();
        service.like_video(id, "other-fan").await.unwrap();

        let liked = service.get_liked_videos("fan").await.unwrap();
        assert_eq!(liked.len(), 2);

        let liked = service.get_liked_videos("other-fan").await.unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].id, id);

        assert!(service.get_liked_videos("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_likes_are_not_lost() {
        let (_, store, id) = fixture().await;
        // Retry budget must cover the worst case of losing to every other
        // writer once: 12 writers, 12 attempts.
        let service = Arc::new(EngagementService::new(store.clone(), 12));

        let mut handles = Vec::new();
        for i in 0..12 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.like_video(id, &format!("user-{}", i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.likes.len(), 12);
    }
}
