//! Shared object-id generation for storage backends.
//!
//! Id format: `videos/{uuid}.{ext}`, with the extension derived from the
//! upload's content type.

use uuid::Uuid;

/// Generate the object id for a video upload.
///
/// The id is chosen by the caller before the object-store write so that a
/// write whose outcome is unknown (e.g. a timeout) can still be compensated
/// by removing the same id.
pub fn video_object_id(media_id: Uuid, content_type: &str) -> String {
    format!("videos/{}.{}", media_id, extension_for(content_type))
}

/// Map a video content type to a file extension. Unknown subtypes fall back
/// to `bin`.
fn extension_for(content_type: &str) -> &'static str {
    let normalized = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase();
    match normalized.as_str() {
        "video/mp4" => "mp4",
        "video/quicktime" => "mov",
        "video/webm" => "webm",
        "video/x-msvideo" => "avi",
        "video/x-matroska" => "mkv",
        "video/ogg" => "ogv",
        _ => "bin",
    }
}
