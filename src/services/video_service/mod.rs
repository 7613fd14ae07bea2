use crate::api::error::AppError;
use crate::entities::{prelude::*, *};
use crate::services::storage::StorageService;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

pub mod delete;
pub mod metadata;
pub mod upload;

/// Pairs the `videos` table with the directory holding the uploaded binaries.
///
/// File and record operations are not wrapped in a shared transaction; each
/// method documents the ordering it relies on instead.
pub struct VideoService {
    db: DatabaseConnection,
    storage: Arc<dyn StorageService>,
}

impl VideoService {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageService>) -> Self {
        Self { db, storage }
    }

    pub async fn list_videos(&self) -> Result<Vec<videos::Model>, AppError> {
        Ok(Videos::find().all(&self.db).await?)
    }

    /// Loads the bytes of the video stored under `filename`.
    ///
    /// A record whose file has vanished is reported as not found. A file that
    /// disappears between the existence check and the read surfaces as a
    /// storage error.
    pub async fn fetch_video(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        let record = Videos::find()
            .filter(videos::Column::Filename.eq(filename))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        let path = record
            .filepath
            .ok_or_else(|| AppError::NotFound("Video has no stored file".to_string()))?;

        if !matches!(self.storage.exists(&path).await, Ok(true)) {
            tracing::warn!("⚠️  Record {} points at missing file {}", record.id, path);
            return Err(AppError::NotFound("Video file not found".to_string()));
        }

        self.storage
            .read(&path)
            .await
            .map_err(|e| AppError::Storage(format!("Error reading video: {}", e)))
    }
}
