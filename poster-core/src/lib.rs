//! # Poster Core
//!
//! Core editing engine for multi-platform marketing posters.
//! Compiles to WASM for browser hosts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                poster-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Generation      │  Variant Store           │
//! │  - Collaborator  │  - One per platform/size │
//! │  - Busy guard    │  - Edit propagation      │
//! │  - Layout seed   │  - Shared copy text      │
//! ├─────────────────────────────────────────────┤
//! │  Interaction     │  Render Tree / Export    │
//! │  - Drag/resize   │  - Resolved styles       │
//! │  - Selection     │  - Export guard          │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod design;
pub mod element;
pub mod error;
pub mod event;
pub mod export;
pub mod generation;
pub mod interaction;
pub mod layout;
pub mod platform;
pub mod schema;
pub mod selection;
pub mod state;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use command::{parse_script, EditCommand};
pub use design::{
    is_hex_color, is_known_font, DesignConcept, DesignPatch, GeneratedText, LayoutStyle,
    TextPatch, KNOWN_FONTS,
};
pub use element::{
    Alignment, ElementKind, ElementPlacement, ElementPlacements, FontStyle, FontWeight,
    PlacementPatch, TextAlign, TextDecoration,
};
pub use error::{EditorError, EditorResult, ExportError, GenerationError};
pub use event::{PointerEvent, PointerPhase, PointerTarget, ScreenRect};
pub use export::{ExportArtifact, ExportFormat, ExportRequest, PosterExporter, CAPTURE_SCALE};
pub use generation::{GenerationPhase, GenerationResult, GenerationTicket, PosterGenerator};
pub use interaction::{InteractionController, InteractionState, InteractionUpdate};
pub use layout::{initial_placements, REFERENCE_CANVAS_WIDTH};
pub use platform::{
    platform, Platform, PlatformSelection, PlatformSize, SelectedPoster, VariantId, PLATFORMS,
};
pub use schema::{ButtonStyle, ElementNode, NodeContent, PosterDocument, RenderContext};
pub use selection::{SelectionKey, SelectionTracker};
pub use state::EditorState;
pub use store::{EditScope, PosterStore, PosterVariant};

/// Poster core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
