//! Error types for editor operations.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors surfaced by the editor's operation boundaries.
///
/// Edits that target a variant no longer in the store are not errors; they
/// are silently dropped. Only generation and export can fail.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A generation cycle is already in flight.
    #[error("A poster generation is already in progress")]
    GenerationInProgress,

    /// The generation collaborator failed or returned an unusable result.
    #[error("{0}")]
    Generation(#[from] GenerationError),

    /// Another export is still running.
    #[error("An export is already in progress: {0}")]
    ExportInProgress(String),

    /// The requested variant is not in the store.
    #[error("Poster variant not found: {0}")]
    VariantNotFound(String),

    /// The export collaborator failed.
    #[error("Sorry, there was an error exporting your poster. Please try again.")]
    Export(#[source] ExportError),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by a generation collaborator.
///
/// The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationError {
    message: String,
}

impl GenerationError {
    /// Create a generation error with a user-facing message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by an export collaborator.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Rendering the poster to an image failed.
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Encoding the captured image failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// The requested format is not supported by this exporter.
    #[error("Unsupported export format: {0}")]
    Unsupported(String),
}
