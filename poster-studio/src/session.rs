//! One headless studio run: generate, edit, export.

use std::path::{Path, PathBuf};

use poster_core::{parse_script, EditorError, EditorState, PosterGenerator};
use poster_renderer::{PosterRenderer, RendererConfig};
use thiserror::Error;

use crate::config::{ConfigError, StudioConfig};
use crate::upload::{image_data_uri, UploadError};

/// Errors that end a studio run.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Generation or export failed.
    #[error(transparent)]
    Editor(#[from] EditorError),
    /// A logo or background file could not be used.
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// The edit script is not valid.
    #[error("invalid edit script {path}: {source}")]
    Script {
        /// Script file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Reading or writing files failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being done.
        context: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Bad configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No selected size produced a poster.
    #[error("no posters to export; select at least one catalog size")]
    NothingToExport,
}

/// What a run wrote to disk.
#[derive(Debug, Clone, Default)]
pub struct StudioReport {
    /// Exported poster files, in selection then format order.
    pub exports: Vec<PathBuf>,
    /// Layout dumps, when requested.
    pub layouts: Vec<PathBuf>,
}

impl StudioReport {
    /// Number of files written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exports.len() + self.layouts.len()
    }

    /// Whether nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run one studio session.
///
/// # Errors
///
/// Returns a [`StudioError`] if an upload, generation, edit script or export
/// fails. Files exported before the failure stay on disk.
pub async fn run(
    config: &StudioConfig,
    generator: &dyn PosterGenerator,
) -> Result<StudioReport, StudioError> {
    let mut editor = EditorState::with_platforms(config.platforms.clone());
    editor.set_sync_edits(config.sync_edits);

    let background = config
        .background
        .as_deref()
        .map(image_data_uri)
        .transpose()?;
    if let Some(logo) = config.logo.as_deref() {
        editor.set_logo(Some(image_data_uri(logo)?));
    }

    tracing::info!("Generating posters for {:?}", config.prompt);
    editor.generate(generator, &config.prompt, background).await?;

    if let Some(path) = config.edits.as_deref() {
        apply_script(&mut editor, path)?;
    }

    let documents = editor.rendered_posters();
    if documents.is_empty() {
        return Err(StudioError::NothingToExport);
    }

    std::fs::create_dir_all(&config.out_dir).map_err(|source| StudioError::Io {
        context: format!("failed to create {}", config.out_dir.display()),
        source,
    })?;

    let renderer = PosterRenderer::new(RendererConfig {
        load_system_fonts: config.system_fonts,
        font_dirs: config.font_dirs.clone(),
        ..RendererConfig::default()
    });

    let mut report = StudioReport::default();
    for document in &documents {
        for &format in &config.formats {
            let artifact = editor.export(&document.variant_id, format, &renderer)?;
            let path = config.out_dir.join(&artifact.file_name);
            write_file(&path, &artifact.bytes)?;
            tracing::info!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
            report.exports.push(path);
        }

        if config.dump_layout {
            let path = config
                .out_dir
                .join(format!("{}.layout.json", document.variant_id));
            let json = serde_json::to_vec_pretty(document).map_err(EditorError::from)?;
            write_file(&path, &json)?;
            report.layouts.push(path);
        }
    }

    Ok(report)
}

fn apply_script(editor: &mut EditorState, path: &Path) -> Result<(), StudioError> {
    let json = std::fs::read_to_string(path).map_err(|source| StudioError::Io {
        context: format!("failed to read {}", path.display()),
        source,
    })?;
    let commands = parse_script(&json).map_err(|source| StudioError::Script {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Applying {} edits from {}", commands.len(), path.display());
    for command in &commands {
        editor.apply(command);
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StudioError> {
    std::fs::write(path, bytes).map_err(|source| StudioError::Io {
        context: format!("failed to write {}", path.display()),
        source,
    })
}
