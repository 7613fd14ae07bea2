use crate::entities::videos;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VideoRecord {
    pub id: i32,
    pub filename: Option<String>,
    pub filepath: Option<String>,
}

impl From<videos::Model> for VideoRecord {
    fn from(model: videos::Model) -> Self {
        Self {
            id: model.id,
            filename: model.filename,
            filepath: model.filepath,
        }
    }
}

/// Multipart form accepted by `POST /videos`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadVideoForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Missing fields are written as NULL.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub filepath: Option<String>,
}
