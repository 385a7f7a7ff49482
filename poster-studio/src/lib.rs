//! # Poster Studio
//!
//! Headless host for poster-core. Provides the Gemini generation client,
//! image upload helpers and a session runner that generates posters for
//! every selected platform size, applies scripted edits and exports files.
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌─────────────┐   ┌────────────────┐
//! │ CliArgs  │ ─▶│ GeminiClient │ ─▶│ EditorState │ ─▶│ PosterRenderer │
//! │ (clap)   │   │ (reqwest)    │   │ (core)      │   │ png/jpeg/pdf   │
//! └──────────┘   └──────────────┘   └─────────────┘   └────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod gemini;
pub mod session;
pub mod upload;

pub use config::{CliArgs, ConfigError, GeminiConfig, StudioConfig};
pub use gemini::{GeminiClient, GeminiError};
pub use session::{run, StudioError, StudioReport};
pub use upload::{bytes_to_data_uri, image_data_uri, UploadError};
