//! # Poster Renderer
//!
//! Export collaborator for poster-core: turns a [`poster_core::PosterDocument`]
//! into file bytes.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────────┐    ┌─────────┐    ┌──────────────┐    ┌──────────┐
//! │ PosterDocument │ ─▶ │   SVG   │ ─▶ │ resvg/skia   │ ─▶ │ PNG      │
//! │ (render tree)  │    │ (2x px) │    │ Pixmap       │    │ JPEG/PDF │
//! └────────────────┘    └─────────┘    └──────────────┘    └──────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod renderer;
pub mod svg;

#[cfg(feature = "export")]
mod raster;

pub use error::{RenderError, RenderResult};
pub use renderer::{PosterRenderer, RendererConfig};
pub use svg::render_svg;
