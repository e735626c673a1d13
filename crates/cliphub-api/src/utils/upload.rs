//! Multipart extraction for the upload handler

use axum::extract::Multipart;
use cliphub_core::AppError;

/// Raw fields of a video upload form. Text fields default to empty strings;
/// the lifecycle service rejects the ones it requires.
#[derive(Debug, Default)]
pub struct VideoUploadForm {
    pub data: Vec<u8>,
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub uploaded_by: String,
}

/// Extract the video upload form from a multipart request.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_video_upload(mut multipart: Multipart) -> Result<VideoUploadForm, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;
    let mut form = VideoUploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if file_data.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                file_data = Some(data.to_vec());
            }
            "title" => form.title = read_text(field, "title").await?,
            "description" => form.description = read_text(field, "description").await?,
            "tags" => form.tags = read_text(field, "tags").await?,
            "uploaded_by" => form.uploaded_by = read_text(field, "uploaded_by").await?,
            _ => {}
        }
    }

    form.data = file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    form.content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read field '{}': {}", name, e)))
}
