use anyhow::{Result, anyhow};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Extension of an uploaded file, including the leading dot (`"clip.webm"` -> `".webm"`).
///
/// Only the final path component of the client-supplied name is considered.
pub fn file_extension(original_filename: &str) -> Result<&str> {
    let name = Path::new(original_filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(anyhow!(ValidationError {
            code: "INVALID_FILENAME",
            message: "Filename cannot be empty".to_string(),
        }));
    }

    let dot = name.rfind('.').ok_or_else(|| {
        anyhow!(ValidationError {
            code: "MISSING_EXTENSION",
            message: format!("Filename '{}' has no extension", name),
        })
    })?;

    let extension = &name[dot..];
    if extension.len() == 1 {
        return Err(anyhow!(ValidationError {
            code: "MISSING_EXTENSION",
            message: format!("Filename '{}' has an empty extension", name),
        }));
    }

    let forbidden = |c: char| {
        c.is_control()
            || c.is_whitespace()
            || matches!(c, '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ';')
    };
    if extension.chars().any(forbidden) {
        tracing::warn!("Rejected unsafe extension in filename: {}", original_filename);
        return Err(anyhow!(ValidationError {
            code: "INVALID_EXTENSION",
            message: format!("Extension '{}' contains forbidden characters", extension),
        }));
    }

    Ok(extension)
}

/// Builds the stored name for an upload: a fresh UUID followed by the original extension.
pub fn generate_stored_filename(original_filename: &str) -> Result<String> {
    let extension = file_extension(original_filename)?;
    Ok(format!("{}{}", Uuid::new_v4(), extension))
}
