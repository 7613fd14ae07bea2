use crate::api::error::AppError;
use axum::{Json, extract::State};

use super::types::VideoRecord;

#[utoipa::path(
    get,
    path = "/videos",
    responses(
        (status = 200, description = "All stored videos", body = [VideoRecord]),
        (status = 500, description = "Database unavailable")
    ),
    tag = "videos"
)]
pub async fn list_videos(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<VideoRecord>>, AppError> {
    let videos = state.video_service.list_videos().await?;
    Ok(Json(videos.into_iter().map(VideoRecord::from).collect()))
}
