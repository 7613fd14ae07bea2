use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Creates the storage location if it does not exist yet.
    async fn ensure_ready(&self) -> Result<()>;
    /// Path string recorded in the `videos` table for a stored filename.
    fn record_path(&self, filename: &str) -> String;
    /// Writes `data` under `filename`, replacing any existing file. Returns the record path.
    async fn save(&self, filename: &str, data: &[u8]) -> Result<String>;
    async fn exists(&self, path: &str) -> Result<bool>;
    async fn read(&self, path: &str) -> Result<Vec<u8>>;
    /// Returns `Ok(false)` when nothing was there to delete.
    async fn delete_if_exists(&self, path: &str) -> Result<bool>;
    async fn is_available(&self) -> bool;
}

/// Stores videos as plain files in a single directory.
///
/// Record paths are built as `<root>/<filename>` and resolved relative to the
/// process working directory when `root` is relative.
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn ensure_ready(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.with_context(|| {
            format!(
                "Could not create the directory where the uploaded files will be stored: {}",
                self.root.display()
            )
        })
    }

    fn record_path(&self, filename: &str) -> String {
        let root = self.root.to_string_lossy();
        format!("{}/{}", root.trim_end_matches('/'), filename)
    }

    async fn save(&self, filename: &str, data: &[u8]) -> Result<String> {
        let target = self.root.join(filename);
        debug!(path = %target.display(), size = data.len(), "storage: write");
        fs::write(&target, data).await?;
        Ok(self.record_path(filename))
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(fs::try_exists(path).await?)
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        debug!(path, "storage: read");
        Ok(fs::read(path).await?)
    }

    async fn delete_if_exists(&self, path: &str) -> Result<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn is_available(&self) -> bool {
        fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
