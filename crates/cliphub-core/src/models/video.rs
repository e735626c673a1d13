use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

/// A single comment on a video. Comments are append-only: there is no edit or
/// delete operation anywhere in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// The central video entity.
///
/// `media_url` and `object_id` are set together at creation from the same
/// upload result and are immutable afterwards; `object_id` is the handle into
/// the object store and is required to delete the underlying media. `owner`
/// never changes after creation. `revision` backs the conditional update in
/// the record store and is incremented on every successful write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub media_url: String,
    pub object_id: String,
    pub owner: String,
    pub uploaded_at: DateTime<Utc>,
    pub likes: HashSet<String>,
    pub comments: Vec<Comment>,
    pub revision: i64,
}

impl VideoRecord {
    /// Whether `user` has liked this video.
    pub fn is_liked_by(&self, user: &str) -> bool {
        self.likes.contains(user)
    }
}

/// Fields of a video record before the store has assigned an id, upload
/// timestamp, and revision.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub media_url: String,
    pub object_id: String,
    pub owner: String,
}

/// Parse a raw comma-separated tag string into a tag list.
///
/// Splits on commas, trims each entry, and drops empties. Duplicates and
/// order are preserved as given.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Client-facing video representation. Omits `object_id` (internal storage
/// handle) and `revision` (internal concurrency counter); likes are sorted so
/// the serialized output is stable.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub media_url: String,
    pub owner: String,
    pub uploaded_at: DateTime<Utc>,
    pub likes: Vec<String>,
    pub like_count: usize,
    pub comments: Vec<Comment>,
}

impl From<VideoRecord> for VideoResponse {
    fn from(video: VideoRecord) -> Self {
        let mut likes: Vec<String> = video.likes.into_iter().collect();
        likes.sort();

        VideoResponse {
            id: video.id,
            title: video.title,
            description: video.description,
            tags: video.tags,
            media_url: video.media_url,
            owner: video.owner,
            uploaded_at: video.uploaded_at,
            like_count: likes.len(),
            likes,
            comments: video.comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_trims_and_drops_empties() {
        assert_eq!(parse_tags("a, b ,,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags(" ,  , "), Vec::<String>::new());
    }

    #[test]
    fn test_parse_tags_preserves_order_and_duplicates() {
        assert_eq!(parse_tags("rust,cats,rust"), vec!["rust", "cats", "rust"]);
    }

    #[test]
    fn test_video_response_hides_internal_fields() {
        let record = VideoRecord {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            description: "D".to_string(),
            tags: vec![],
            media_url: "https://example.com/videos/x.mp4".to_string(),
            object_id: "videos/x.mp4".to_string(),
            owner: "u1".to_string(),
            uploaded_at: Utc::now(),
            likes: HashSet::from(["b".to_string(), "a".to_string()]),
            comments: vec![],
            revision: 7,
        };

        let json = serde_json::to_value(VideoResponse::from(record)).unwrap();
        assert!(json.get("object_id").is_none());
        assert!(json.get("revision").is_none());
        assert_eq!(json["likes"], serde_json::json!(["a", "b"]));
        assert_eq!(json["like_count"], 2);
    }
}
