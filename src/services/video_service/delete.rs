use crate::api::error::AppError;
use crate::entities::prelude::*;
use sea_orm::EntityTrait;

use super::VideoService;

impl VideoService {
    /// Removes the stored file, then the record.
    ///
    /// A missing file counts as already deleted. Any other file error aborts
    /// before the record is touched, so the record keeps pointing at the file
    /// that is still on disk.
    pub async fn delete_video(&self, id: i32) -> Result<(), AppError> {
        let record = Videos::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        if let Some(path) = record.filepath.as_deref() {
            match self.storage.delete_if_exists(path).await {
                Ok(true) => tracing::debug!("Removed file {}", path),
                Ok(false) => tracing::warn!("⚠️  File {} was already absent", path),
                Err(e) => {
                    return Err(AppError::Storage(format!("Error deleting file: {}", e)));
                }
            }
        }

        Videos::delete_by_id(id).exec(&self.db).await?;
        tracing::info!("🗑️  Deleted video {}", id);

        Ok(())
    }
}
