//! PostgreSQL implementation of the video record store.
//!
//! Rows keep `tags` and `likes` as `TEXT[]` and `comments` as `JSONB`; the
//! conditional update is a compare-and-swap on the `revision` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cliphub_core::models::{Comment, NewVideo, VideoRecord};
use cliphub_core::AppError;
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use std::collections::HashSet;
use uuid::Uuid;

use crate::store::VideoStore;

const SELECT_COLUMNS: &str = "id, title, description, tags, media_url, object_id, owner, \
     uploaded_at, likes, comments, revision";

/// Database row for the videos table.
#[derive(Debug, FromRow)]
struct VideoRow {
    id: Uuid,
    title: String,
    description: String,
    tags: Vec<String>,
    media_url: String,
    object_id: String,
    owner: String,
    uploaded_at: DateTime<Utc>,
    likes: Vec<String>,
    comments: JsonValue,
    revision: i64,
}

impl VideoRow {
    /// Build the domain record from this row. A malformed or absent comments
    /// column decodes to an empty list; collections are always present.
    fn into_record(self) -> VideoRecord {
        let comments: Vec<Comment> = serde_json::from_value(self.comments).unwrap_or_default();
        VideoRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            tags: self.tags,
            media_url: self.media_url,
            object_id: self.object_id,
            owner: self.owner,
            uploaded_at: self.uploaded_at,
            likes: self.likes.into_iter().collect::<HashSet<String>>(),
            comments,
            revision: self.revision,
        }
    }
}

/// Sorted likes for storage, so the array column stays deterministic.
fn likes_param(record: &VideoRecord) -> Vec<String> {
    let mut likes: Vec<String> = record.likes.iter().cloned().collect();
    likes.sort();
    likes
}

fn comments_param(record: &VideoRecord) -> Result<JsonValue, AppError> {
    serde_json::to_value(&record.comments)
        .map_err(|e| AppError::Internal(format!("Failed to serialize comments: {}", e)))
}

/// PostgreSQL-backed video record store.
#[derive(Clone)]
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError> {
        let sql = format!(
            "INSERT INTO videos (title, description, tags, media_url, object_id, owner) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            SELECT_COLUMNS
        );

        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.tags)
            .bind(&video.media_url)
            .bind(&video.object_id)
            .bind(&video.owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into_record())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        let sql = format!("SELECT {} FROM videos WHERE id = $1", SELECT_COLUMNS);

        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(VideoRow::into_record))
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<VideoRecord>, AppError> {
        let sql = format!(
            "SELECT {} FROM videos WHERE owner = $1 ORDER BY uploaded_at DESC, id",
            SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(VideoRow::into_record).collect())
    }

    async fn find_all(&self) -> Result<Vec<VideoRecord>, AppError> {
        let sql = format!(
            "SELECT {} FROM videos ORDER BY uploaded_at DESC, id",
            SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<_, VideoRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(VideoRow::into_record).collect())
    }

    async fn update(&self, video: &VideoRecord) -> Result<VideoRecord, AppError> {
        let sql = format!(
            "UPDATE videos \
             SET title = $2, description = $3, tags = $4, likes = $5, comments = $6, \
                 revision = revision + 1 \
             WHERE id = $1 AND revision = $7 \
             RETURNING {}",
            SELECT_COLUMNS
        );

        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(video.id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.tags)
            .bind(likes_param(video))
            .bind(comments_param(video)?)
            .bind(video.revision)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.into_record()),
            None => {
                // Distinguish a lost race from a deleted record.
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS (SELECT 1 FROM videos WHERE id = $1)",
                )
                .bind(video.id)
                .fetch_one(&self.pool)
                .await?;

                if exists {
                    Err(AppError::Conflict(format!(
                        "Video {} was modified concurrently",
                        video.id
                    )))
                } else {
                    Err(AppError::NotFound("Video not found".to_string()))
                }
            }
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        Ok(())
    }
}
