use std::env;

/// Runtime configuration for the video service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string (default: "sqlite://videos.db?mode=rwc")
    pub database_url: String,

    /// Directory holding uploaded video binaries (default: "videos")
    pub storage_dir: String,

    /// Maximum upload size in bytes (default: 512 MB)
    pub max_file_size: usize,

    /// Database pool size (default: 10)
    pub max_connections: u32,

    /// Content-Type served for every fetched video (default: "video/webm")
    pub media_type: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://videos.db?mode=rwc".to_string(),
            storage_dir: "videos".to_string(),
            max_file_size: 512 * 1024 * 1024, // 512 MB
            max_connections: 10,
            media_type: "video/webm".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            storage_dir: env::var("VIDEO_STORAGE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default.storage_dir),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_connections),

            media_type: env::var("VIDEO_MEDIA_TYPE").unwrap_or(default.media_type),
        }
    }

    /// Config for tests: in-memory SQLite and a caller-provided storage directory
    pub fn for_testing(storage_dir: impl Into<String>) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            storage_dir: storage_dir.into(),
            max_file_size: 16 * 1024 * 1024,
            max_connections: 1,
            ..Self::default()
        }
    }
}
