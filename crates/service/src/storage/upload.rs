use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::errors::ServiceError;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Why an image part was refused. `Display` is the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("No image part")]
    NoImagePart,
    #[error("No selected file")]
    NoSelectedFile,
    #[error("Invalid file type")]
    InvalidFileType,
}

/// True when the text after the last `.` is an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Reduce a client-supplied filename to a flat, ASCII-only name safe to join
/// onto the upload directory. Accented letters decompose (NFKD) to their base
/// letter; other non-ASCII is dropped. May return an empty string.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Validate the raw filename of an `image` part and return the name to store it under.
pub fn accept_image_filename(raw: &str) -> Result<String, UploadRejection> {
    if raw.is_empty() {
        return Err(UploadRejection::NoSelectedFile);
    }
    if !allowed_file(raw) {
        return Err(UploadRejection::InvalidFileType);
    }
    let safe = secure_filename(raw);
    // Sanitizing can eat the whole stem or the extension ("..png" -> "png")
    if safe.is_empty() || !allowed_file(&safe) {
        return Err(UploadRejection::InvalidFileType);
    }
    Ok(safe)
}

/// Write `data` to `<dir>/<filename>`, replacing any existing file, and
/// return the path written.
pub async fn save_upload(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf, ServiceError> {
    fs::create_dir_all(dir).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
    let path = dir.join(filename);
    fs::write(&path, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
    debug!(path = %path.display(), bytes = data.len(), "upload saved");
    Ok(path)
}
