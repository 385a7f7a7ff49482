//! Renderer error types.

use poster_core::ExportError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The SVG intermediate could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// Rasterization failed.
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Encoding the output file failed.
    #[error("{0}")]
    Encode(String),

    /// The format needs a feature this build lacks.
    #[error("Format not supported by this build: {0}")]
    Unsupported(String),
}

impl From<RenderError> for ExportError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Svg(msg) | RenderError::Raster(msg) => Self::Render(msg),
            RenderError::Encode(msg) => Self::Encode(msg),
            RenderError::Unsupported(msg) => Self::Unsupported(msg),
        }
    }
}
