use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};

use super::types::VideoRecord;

#[utoipa::path(
    post,
    path = "/videos",
    request_body(content = UploadVideoForm, content_type = "multipart/form-data", description = "Video upload"),
    responses(
        (status = 200, description = "Video stored", body = VideoRecord),
        (status = 400, description = "Missing file field or filename without extension"),
        (status = 413, description = "Upload exceeds the size limit"),
        (status = 500, description = "File could not be written")
    ),
    tag = "videos"
)]
pub async fn upload_video(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<VideoRecord>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let original_filename = field
            .file_name()
            .map(|n| n.to_string())
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no filename".to_string()))?;

        let data = field.bytes().await.map_err(multipart_error)?;

        let video = state
            .video_service
            .create_video(&original_filename, &data)
            .await?;

        return Ok(Json(VideoRecord::from(video)));
    }

    Err(AppError::BadRequest(
        "Missing multipart field 'file'".to_string(),
    ))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    // The length-limit cause sits in the source chain; the status carries it
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::BadRequest(e.body_text())
    }
}
