use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::types::UpdateVideoRequest;

#[utoipa::path(
    delete,
    path = "/videos/{id}",
    params(
        ("id" = i32, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video deleted", body = String),
        (status = 404, description = "Video not found"),
        (status = 500, description = "File could not be deleted; record kept")
    ),
    tag = "videos"
)]
pub async fn delete_video(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<&'static str, AppError> {
    state.video_service.delete_video(id).await?;
    Ok("Video deleted successfully")
}

#[utoipa::path(
    put,
    path = "/videos/{id}",
    params(
        ("id" = i32, Path, description = "Video ID")
    ),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Update statement issued")
    ),
    tag = "videos"
)]
pub async fn update_video(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateVideoRequest>,
) -> Result<StatusCode, AppError> {
    state
        .video_service
        .update_video(id, req.filename, req.filepath)
        .await?;
    Ok(StatusCode::OK)
}
