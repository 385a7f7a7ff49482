//! Export collaborator boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::schema::PosterDocument;

/// Capture resolution relative to the poster's native size.
pub const CAPTURE_SCALE: f32 = 2.0;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// Single-page PDF.
    Pdf,
}

impl ExportFormat {
    /// All formats offered to the user.
    pub const ALL: [Self; 3] = [Self::Png, Self::Jpeg, Self::Pdf];

    /// File extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Pdf => "pdf",
        }
    }

    /// MIME type.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            other => Err(ExportError::Unsupported(other.to_string())),
        }
    }
}

/// What the exporter should produce.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// Output format.
    pub format: ExportFormat,
    /// Capture width in pixels.
    pub pixel_width: u32,
    /// Capture height in pixels.
    pub pixel_height: u32,
}

impl ExportRequest {
    /// Request a capture of `document` at [`CAPTURE_SCALE`].
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn for_document(document: &PosterDocument, format: ExportFormat) -> Self {
        Self {
            format,
            pixel_width: (document.width as f32 * CAPTURE_SCALE) as u32,
            pixel_height: (document.height as f32 * CAPTURE_SCALE) as u32,
        }
    }
}

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name: `"{variant}.{ext}"`.
    pub file_name: String,
    /// Format of `bytes`.
    pub format: ExportFormat,
    /// Encoded file contents.
    pub bytes: Vec<u8>,
}

/// Turns an unscaled render tree into file bytes.
pub trait PosterExporter {
    /// Render and encode `document`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] when rendering or encoding fails.
    fn export(&self, document: &PosterDocument, request: &ExportRequest)
        -> Result<Vec<u8>, ExportError>;
}

/// Holds the in-progress export marker and clears it on drop.
///
/// Released on success, failure and unwind alike.
pub(crate) struct ExportGuard<'a> {
    slot: &'a mut Option<String>,
}

impl<'a> ExportGuard<'a> {
    /// Claim the marker slot, or return the id already holding it.
    pub(crate) fn acquire(slot: &'a mut Option<String>, export_id: String) -> Result<Self, String> {
        if let Some(existing) = slot.as_ref() {
            return Err(existing.clone());
        }
        *slot = Some(export_id);
        Ok(Self { slot })
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.slot.take() {
            tracing::debug!("Released export marker {id}");
        }
    }
}
