//! Upload and request validation helpers.
//!
//! All checks here run before any external call is made, so a rejected
//! request has zero side effects.

use crate::AppError;

/// Normalize a MIME type by stripping parameters (e.g. "video/mp4; codecs=avc1" -> "video/mp4").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate an uploaded video file: non-empty, a `video/*` content type, and
/// within the configured size limit.
pub fn validate_video_file(
    data: &[u8],
    content_type: &str,
    max_size: usize,
) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::InvalidInput("File is empty".to_string()));
    }

    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !normalized.starts_with("video/") {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type '{}': expected a video/* type",
            content_type
        )));
    }

    if data.len() > max_size {
        return Err(AppError::InvalidInput(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }

    Ok(())
}

/// Validate a required text field, returning its trimmed value.
pub fn required_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Field '{}' must not be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; empty-after-trim values collapse to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
