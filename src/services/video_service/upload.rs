use crate::api::error::AppError;
use crate::entities::videos;
use crate::utils::validation::generate_stored_filename;
use sea_orm::{ActiveModelTrait, Set};

use super::VideoService;

impl VideoService {
    /// Stores an uploaded video under a generated name and records it.
    ///
    /// The file is written first. If the insert then fails the file is removed
    /// again so no orphan is left in the storage directory.
    pub async fn create_video(
        &self,
        original_filename: &str,
        data: &[u8],
    ) -> Result<videos::Model, AppError> {
        let filename = generate_stored_filename(original_filename)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let filepath = self
            .storage
            .save(&filename, data)
            .await
            .map_err(|e| AppError::Storage(format!("Error saving video: {}", e)))?;

        let record = videos::ActiveModel {
            filename: Set(Some(filename.clone())),
            filepath: Set(Some(filepath.clone())),
            ..Default::default()
        };

        match record.insert(&self.db).await {
            Ok(model) => {
                tracing::info!(
                    "💾 Stored video {} ({} bytes) from upload '{}'",
                    filename,
                    data.len(),
                    original_filename
                );
                Ok(model)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete_if_exists(&filepath).await {
                    tracing::error!(
                        "❌ Failed to remove orphaned upload {}: {}",
                        filepath,
                        cleanup
                    );
                }
                Err(AppError::Database(e))
            }
        }
    }
}
