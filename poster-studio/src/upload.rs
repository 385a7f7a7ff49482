//! Local image files to inline data URIs.

use std::path::{Path, PathBuf};

use base64::Engine;
use thiserror::Error;

/// Errors reading an uploaded image.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The bytes are not a recognised image.
    #[error("{0} is not a supported image")]
    UnknownFormat(String),
}

/// Read an image file and encode it as a `data:` URI.
///
/// # Errors
///
/// Returns [`UploadError::Io`] if the file cannot be read, or
/// [`UploadError::UnknownFormat`] if it is not an image.
pub fn image_data_uri(path: &Path) -> Result<String, UploadError> {
    let bytes = std::fs::read(path).map_err(|source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let uri = bytes_to_data_uri(&bytes)
        .map_err(|_| UploadError::UnknownFormat(path.display().to_string()))?;
    tracing::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
    Ok(uri)
}

/// Encode image bytes as a `data:` URI, sniffing the MIME type.
///
/// # Errors
///
/// Returns [`UploadError::UnknownFormat`] if the bytes are not an image.
pub fn bytes_to_data_uri(bytes: &[u8]) -> Result<String, UploadError> {
    let format = image::guess_format(bytes)
        .map_err(|_| UploadError::UnknownFormat(format!("{} bytes of data", bytes.len())))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{encoded}", format.to_mime_type()))
}
