//! Multipart reading and image responses shared by the photo endpoints

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Multipart;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::photo::{PhotoContent, PhotoUpload},
};

/// Multipart form accepted by the upload endpoints: any number of file
/// fields, under any field name
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct PhotoUploadForm {
    #[schema(value_type = Vec<String>, format = Binary)]
    files: Vec<Vec<u8>>,
}

/// Collect every file field of the form. Plain text fields are skipped.
pub async fn read_uploads(mut multipart: Multipart) -> AppResult<Vec<PhotoUpload>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", file_name, e)))?;

        uploads.push(PhotoUpload {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    Ok(uploads)
}

/// Raw image bytes with their stored content type. Thumbnails are the same
/// bytes under a `thumb_` file name.
pub fn image_response(content: PhotoContent, thumbnail: bool) -> Response {
    let file_name = if thumbnail {
        format!("thumb_{}", content.photo.file_name)
    } else {
        content.photo.file_name
    };

    (
        [
            (header::CONTENT_TYPE, content.photo.content_type),
            (header::CONTENT_DISPOSITION, format!("inline; filename=\"{}\"", file_name)),
        ],
        content.image_data,
    )
        .into_response()
}
