//! Bounded retry loop around the store's conditional update.
//!
//! Every mutation of an existing record (update, like, unlike, comment) goes
//! through `mutate_video` rather than an unconditional overwrite, so a lost
//! race is retried from a fresh read instead of silently dropping the other
//! writer's change.

use cliphub_core::models::VideoRecord;
use cliphub_core::AppError;
use std::time::Duration;
use uuid::Uuid;

use crate::store::VideoStore;

/// Fetch-modify-conditionally-write with a bounded number of attempts.
///
/// `apply` receives the freshly fetched record on every attempt. Conflicts
/// are retried with a short linear backoff; other errors (including
/// `NotFound` for a record deleted mid-cycle) surface immediately. When the
/// final attempt also conflicts, the store's `Conflict` error is returned.
pub async fn mutate_video<F>(
    store: &dyn VideoStore,
    id: Uuid,
    max_attempts: u32,
    mut apply: F,
) -> Result<VideoRecord, AppError>
where
    F: FnMut(&mut VideoRecord),
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        let mut record = store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        apply(&mut record);

        match store.update(&record).await {
            Ok(updated) => return Ok(updated),
            Err(AppError::Conflict(_)) if attempt < max_attempts => {
                let delay_ms = 25 * attempt as u64;
                tracing::warn!(
                    video_id = %id,
                    attempt = attempt,
                    max_attempts = max_attempts,
                    delay_ms = delay_ms,
                    "Conditional update conflict, retrying"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryVideoStore;
    use cliphub_core::models::NewVideo;
    use std::sync::Arc;

    fn new_video() -> NewVideo {
        NewVideo {
            title: "T".to_string(),
            description: "D".to_string(),
            tags: vec![],
            media_url: "https://media.example.com/videos/x.mp4".to_string(),
            object_id: "videos/x.mp4".to_string(),
            owner: "u1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mutate_applies_and_persists() {
        let store = MemoryVideoStore::new();
        let record = store.insert(new_video()).await.unwrap();

        let updated = mutate_video(&store, record.id, 3, |v| {
            v.likes.insert("u2".to_string());
        })
        .await
        .unwrap();

        assert!(updated.likes.contains("u2"));
        assert_eq!(updated.revision, 1);
    }

    #[tokio::test]
    async fn test_mutate_missing_record_is_not_found() {
        let store = MemoryVideoStore::new();
        let err = mutate_video(&store, Uuid::new_v4(), 3, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_mutations_all_land() {
        let store = Arc::new(MemoryVideoStore::new());
        let record = store.insert(new_video()).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            let id = record.id;
            handles.push(tokio::spawn(async move {
                let user = format!("user-{}", i);
                mutate_video(store.as_ref(), id, 10, move |v| {
                    v.likes.insert(user.clone());
                })
                .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(stored.likes.len(), 10);
        assert_eq!(stored.revision, 10);
    }
}
