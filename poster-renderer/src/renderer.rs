//! The poster export collaborator.

use std::path::PathBuf;

use poster_core::{ExportError, ExportFormat, ExportRequest, PosterDocument, PosterExporter};

use crate::error::RenderResult;
use crate::svg::render_svg;

/// Configuration for poster export.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// JPEG quality 1-100 for JPEG files (default: 95).
    pub jpeg_quality: u8,
    /// JPEG quality 1-100 for the raster embedded in PDFs (default: 90).
    pub pdf_jpeg_quality: u8,
    /// Pixels per inch used to size PDF pages (default: 96.0).
    pub dpi: f32,
    /// Color behind transparent pixels in JPEG and PDF output.
    pub matte: [u8; 3],
    /// Load installed system fonts for text rendering (default: true).
    pub load_system_fonts: bool,
    /// Extra directories to load fonts from.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            pdf_jpeg_quality: 90,
            dpi: 96.0,
            matte: [255, 255, 255],
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// Renders poster documents to PNG, JPEG, PDF or SVG bytes.
pub struct PosterRenderer {
    config: RendererConfig,
    #[cfg(feature = "export")]
    options: usvg::Options<'static>,
}

impl PosterRenderer {
    /// Create a renderer, loading fonts as configured.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        #[cfg(feature = "export")]
        let options = {
            let mut options = usvg::Options::default();
            let fontdb = options.fontdb_mut();
            if config.load_system_fonts {
                fontdb.load_system_fonts();
            }
            for dir in &config.font_dirs {
                fontdb.load_fonts_dir(dir);
            }
            tracing::debug!("Renderer loaded {} font faces", fontdb.len());
            options
        };

        Self {
            config,
            #[cfg(feature = "export")]
            options,
        }
    }

    /// Create a renderer with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RendererConfig::default())
    }

    /// Renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render the SVG intermediate for a request.
    #[must_use]
    pub fn render_to_svg(&self, document: &PosterDocument, request: &ExportRequest) -> String {
        render_svg(document, request.pixel_width, request.pixel_height)
    }

    /// Render and encode a poster.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails, or if raster
    /// output is requested from a build without the `export` feature.
    pub fn render(
        &self,
        document: &PosterDocument,
        request: &ExportRequest,
    ) -> RenderResult<Vec<u8>> {
        let svg = self.render_to_svg(document, request);
        self.encode(&svg, document, request)
    }

    #[cfg(feature = "export")]
    fn encode(
        &self,
        svg: &str,
        document: &PosterDocument,
        request: &ExportRequest,
    ) -> RenderResult<Vec<u8>> {
        use crate::raster::{encode_jpeg, encode_pdf, encode_png, rasterize_svg};

        let pixmap = rasterize_svg(svg, &self.options)?;
        match request.format {
            ExportFormat::Png => encode_png(&pixmap),
            ExportFormat::Jpeg => encode_jpeg(&pixmap, self.config.jpeg_quality, self.config.matte),
            ExportFormat::Pdf => {
                let jpeg = encode_jpeg(&pixmap, self.config.pdf_jpeg_quality, self.config.matte)?;
                encode_pdf(
                    &jpeg,
                    pixmap.width(),
                    document.width,
                    document.height,
                    self.config.dpi,
                    document.variant_id.as_str(),
                )
            }
        }
    }

    #[cfg(not(feature = "export"))]
    #[allow(clippy::unused_self)]
    fn encode(
        &self,
        _svg: &str,
        _document: &PosterDocument,
        request: &ExportRequest,
    ) -> RenderResult<Vec<u8>> {
        Err(crate::error::RenderError::Unsupported(request.format.to_string()))
    }
}

impl Default for PosterRenderer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PosterExporter for PosterRenderer {
    fn export(
        &self,
        document: &PosterDocument,
        request: &ExportRequest,
    ) -> Result<Vec<u8>, ExportError> {
        let bytes = self.render(document, request)?;
        tracing::debug!(
            "Encoded {} as {} ({} bytes)",
            document.variant_id,
            request.format,
            bytes.len()
        );
        Ok(bytes)
    }
}
