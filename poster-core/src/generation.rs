//! Generation collaborator boundary and cycle lifecycle types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::design::{DesignConcept, GeneratedText};
use crate::error::GenerationError;

/// Everything one generation call produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Marketing copy shared by all variants.
    #[serde(alias = "generatedText")]
    pub text: GeneratedText,
    /// Design concept seeding every variant.
    pub design: DesignConcept,
    /// Background image reference (URL or data URI).
    pub image: String,
}

/// External service producing copy, a design concept and background art.
///
/// Called exactly once per generation cycle.
#[async_trait]
pub trait PosterGenerator: Send + Sync {
    /// Generate poster content for `prompt`.
    ///
    /// When `background_image` is supplied it is used as the poster
    /// background instead of a generated image.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] with a user-facing message when the
    /// remote call fails or its output cannot be parsed.
    async fn generate(
        &self,
        prompt: &str,
        background_image: Option<&str>,
    ) -> Result<GenerationResult, GenerationError>;
}

/// Lifecycle of the most recent generation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPhase {
    /// Nothing generated yet.
    #[default]
    Idle,
    /// Waiting on the collaborator.
    Generating,
    /// Variants are available for editing.
    Ready,
    /// The last cycle failed; the store is empty.
    Failed,
}

/// Proof that a generation cycle was started.
///
/// Returned by `begin_generation` and consumed by `complete_generation`.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a started generation must be completed"]
pub struct GenerationTicket {
    pub(crate) cycle: u64,
    pub(crate) prompt: String,
    pub(crate) background_image: Option<String>,
}

impl GenerationTicket {
    /// Prompt to send to the collaborator.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// User-supplied background image, if any.
    #[must_use]
    pub fn background_image(&self) -> Option<&str> {
        self.background_image.as_deref()
    }
}
