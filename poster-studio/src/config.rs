//! Command-line arguments and resolved studio configuration.

use std::path::PathBuf;

use clap::Parser;
use poster_core::{platform, ExportFormat, PlatformSelection};
use thiserror::Error;

/// Default Gemini REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/";

/// Default model for copywriting and design concepts.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-pro";

/// Default model for background images.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Errors in user-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key in flags or environment.
    #[error("GEMINI_API_KEY (or API_KEY) is not set")]
    MissingApiKey,
    /// A `--size` value is not `platform:size`.
    #[error("invalid size {0:?}, expected PLATFORM:SIZE such as instagram:Post")]
    InvalidSize(String),
}

/// Command-line arguments for poster-studio.
#[derive(Debug, Clone, Parser)]
#[command(name = "poster-studio")]
#[command(about = "Generate, edit and export social media posters for several platforms at once")]
#[command(version)]
pub struct CliArgs {
    /// What the posters should advertise
    #[arg(short, long)]
    pub prompt: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini API base URL
    #[arg(long, env = "POSTER_GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model used for copy and design
    #[arg(long, default_value = DEFAULT_TEXT_MODEL)]
    pub text_model: String,

    /// Model used for background images
    #[arg(long, default_value = DEFAULT_IMAGE_MODEL)]
    pub image_model: String,

    /// Platform size to produce, as PLATFORM:SIZE (repeatable; default instagram:Post and facebook:Post)
    #[arg(long = "size", value_name = "PLATFORM:SIZE")]
    pub sizes: Vec<String>,

    /// Use this image as the background instead of generating one
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Logo image placed on every poster
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Export formats (comma separated: png, jpeg, pdf)
    #[arg(long = "format", value_delimiter = ',', default_value = "png")]
    pub formats: Vec<ExportFormat>,

    /// Directory to write posters into
    #[arg(short, long, default_value = "posters")]
    pub out_dir: PathBuf,

    /// Apply element edits to the named poster only
    #[arg(long)]
    pub no_sync: bool,

    /// JSON file with a list of edit commands to apply after generation
    #[arg(long)]
    pub edits: Option<PathBuf>,

    /// Also write each poster's resolved layout as JSON
    #[arg(long)]
    pub dump_layout: bool,

    /// Extra font directory (repeatable)
    #[arg(long = "font-dir")]
    pub font_dirs: Vec<PathBuf>,
}

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL of the REST API.
    pub endpoint: String,
    /// Model for copy and design.
    pub text_model: String,
    /// Model for background images.
    pub image_model: String,
}

impl GeminiConfig {
    /// Configuration for the public endpoint and default models.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Point the client at another base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Everything one studio run needs besides the generator.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Poster prompt.
    pub prompt: String,
    /// Sizes to generate.
    pub platforms: PlatformSelection,
    /// Background image file.
    pub background: Option<PathBuf>,
    /// Logo image file.
    pub logo: Option<PathBuf>,
    /// Export formats, in order.
    pub formats: Vec<ExportFormat>,
    /// Output directory.
    pub out_dir: PathBuf,
    /// Whether element edits fan out to every poster.
    pub sync_edits: bool,
    /// Edit script file.
    pub edits: Option<PathBuf>,
    /// Write render trees next to the exports.
    pub dump_layout: bool,
    /// Load installed system fonts.
    pub system_fonts: bool,
    /// Extra font directories.
    pub font_dirs: Vec<PathBuf>,
}

impl StudioConfig {
    /// A configuration with defaults for everything but the prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompt: prompt.into(),
            platforms: PlatformSelection::default(),
            background: None,
            logo: None,
            formats: vec![ExportFormat::Png],
            out_dir: out_dir.into(),
            sync_edits: true,
            edits: None,
            dump_layout: false,
            system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

impl CliArgs {
    /// Resolve the Gemini configuration, falling back to `API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no key is available.
    pub fn gemini_config(&self) -> Result<GeminiConfig, ConfigError> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(GeminiConfig {
            api_key,
            endpoint: self.endpoint.clone(),
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
        })
    }
}

impl TryFrom<CliArgs> for StudioConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let platforms = if args.sizes.is_empty() {
            PlatformSelection::default()
        } else {
            parse_sizes(&args.sizes)?
        };
        Ok(Self {
            prompt: args.prompt,
            platforms,
            background: args.background,
            logo: args.logo,
            formats: args.formats,
            out_dir: args.out_dir,
            sync_edits: !args.no_sync,
            edits: args.edits,
            dump_layout: args.dump_layout,
            system_fonts: true,
            font_dirs: args.font_dirs,
        })
    }
}

/// Build a selection from `platform:size` pairs.
///
/// Platform keys are case-insensitive. Pairs outside the catalog are kept
/// with a warning; they are generated but never rendered.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSize`] for a value without a `:`.
pub fn parse_sizes(values: &[String]) -> Result<PlatformSelection, ConfigError> {
    let mut selection = PlatformSelection::empty();
    for value in values {
        let (platform_key, size) = value
            .split_once(':')
            .filter(|(p, s)| !p.is_empty() && !s.is_empty())
            .ok_or_else(|| ConfigError::InvalidSize(value.clone()))?;
        let platform_key = platform_key.to_ascii_lowercase();
        if platform(&platform_key).and_then(|p| p.size(size)).is_none() {
            tracing::warn!("{platform_key}:{size} is not a known poster size");
        }
        selection.set(&platform_key, size, true);
    }
    Ok(selection)
}
