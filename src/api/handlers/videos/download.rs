use crate::api::error::AppError;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

#[utoipa::path(
    get,
    path = "/videos/{filename}",
    params(
        ("filename" = String, Path, description = "Generated filename of the video")
    ),
    responses(
        (status = 200, description = "Raw video bytes served as video/webm"),
        (status = 404, description = "No record, or the stored file is gone"),
        (status = 500, description = "File could not be read")
    ),
    tag = "videos"
)]
pub async fn get_video(
    State(state): State<crate::AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.video_service.fetch_video(&filename).await?;

    Ok((
        [(header::CONTENT_TYPE, state.config.media_type.clone())],
        bytes,
    )
        .into_response())
}
