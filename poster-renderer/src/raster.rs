//! SVG rasterization and file encoding.

use image::ImageEncoder;

use crate::error::{RenderError, RenderResult};

/// Parse and draw an SVG document into a fresh pixmap of its own size.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn rasterize_svg(
    svg: &str,
    options: &usvg::Options<'_>,
) -> RenderResult<tiny_skia::Pixmap> {
    let tree = usvg::Tree::from_str(svg, options).map_err(|e| RenderError::Svg(e.to_string()))?;

    let size = tree.size();
    let (px_w, px_h) = (size.width() as u32, size.height() as u32);

    let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
        .ok_or_else(|| RenderError::Raster(format!("cannot allocate {px_w}x{px_h} pixmap")))?;

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Encode a pixmap as PNG.
pub(crate) fn encode_png(pixmap: &tiny_skia::Pixmap) -> RenderResult<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
}

/// Encode a pixmap as JPEG, compositing transparency over `background`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn encode_jpeg(
    pixmap: &tiny_skia::Pixmap,
    quality: u8,
    background: [u8; 3],
) -> RenderResult<Vec<u8>> {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    // Pixmap data is premultiplied.
    for pixel in pixmap.data().chunks_exact(4) {
        let inv = 1.0 - f32::from(pixel[3]) / 255.0;
        for (&bg, &px) in background.iter().zip(&pixel[..3]) {
            let value = f32::from(bg).mul_add(inv, f32::from(px));
            rgb.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }

    let mut out = std::io::Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .write_image(&rgb, width, height, image::ColorType::Rgb8.into())
        .map_err(|e| RenderError::Encode(format!("JPEG encoding failed: {e}")))?;

    Ok(out.into_inner())
}

/// Wrap a JPEG capture in a single-page PDF sized `page_width_px` ×
/// `page_height_px` CSS pixels.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn encode_pdf(
    jpeg: &[u8],
    capture_width: u32,
    page_width_px: u32,
    page_height_px: u32,
    dpi: f32,
    title: &str,
) -> RenderResult<Vec<u8>> {
    let page_width_mm = page_width_px as f32 / dpi * 25.4;
    let page_height_mm = page_height_px as f32 / dpi * 25.4;

    let (pdf, page, layer) = printpdf::PdfDocument::new(
        title,
        printpdf::Mm(page_width_mm),
        printpdf::Mm(page_height_mm),
        "Poster",
    );
    let layer = pdf.get_page(page).get_layer(layer);

    let decoded = printpdf::image_crate::load_from_memory(jpeg)
        .map_err(|e| RenderError::Encode(format!("Failed to decode capture for PDF: {e}")))?;
    let capture = printpdf::Image::from_dynamic_image(&decoded);

    // The capture is larger than the page; raise its dpi so it fills it.
    let image_dpi = capture_width as f32 / (page_width_mm / 25.4);
    let transform = printpdf::ImageTransform {
        translate_x: Some(printpdf::Mm(0.0)),
        translate_y: Some(printpdf::Mm(0.0)),
        dpi: Some(image_dpi),
        ..Default::default()
    };
    capture.add_to_layer(layer, transform);

    pdf.save_to_bytes()
        .map_err(|e| RenderError::Encode(format!("PDF save failed: {e}")))
}
