use crate::config::AppConfig;
use crate::services::storage::{LocalStorageService, StorageService};
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &AppConfig) -> anyhow::Result<Arc<dyn StorageService>> {
    let storage = LocalStorageService::new(&config.storage_dir);

    info!("🗄️  Video storage: {}", storage.root().display());

    storage.ensure_ready().await?;
    info!("✅ Storage directory '{}' is ready", config.storage_dir);

    Ok(Arc::new(storage))
}
