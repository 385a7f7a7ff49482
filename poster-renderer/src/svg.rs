//! Render tree to SVG.
//!
//! SVG 1.1 has no text flow, so wrapping is done here with an average glyph
//! width estimate. Lines break on whitespace only.

use std::fmt::Write;

use poster_core::{
    ElementNode, FontStyle, FontWeight, NodeContent, PosterDocument, TextAlign, TextDecoration,
};

/// Average advance of one glyph, in ems.
const AVG_GLYPH_WIDTH_EM: f32 = 0.55;

/// Distance from a line box's center to its alphabetic baseline, in ems.
const BASELINE_OFFSET_EM: f32 = 0.35;

/// Render `document` to an SVG string `pixel_width` × `pixel_height` pixels
/// large whose user space is the poster's native size.
#[must_use]
pub fn render_svg(document: &PosterDocument, pixel_width: u32, pixel_height: u32) -> String {
    let native_w = document.width;
    let native_h = document.height;

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{pixel_width}\" height=\"{pixel_height}\" viewBox=\"0 0 {native_w} {native_h}\">",
    );

    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&document.background_color),
    );

    if let Some(src) = document.background_image.as_deref() {
        if is_embeddable(src) {
            // Cover-fit: fill the canvas, crop the overflow.
            let _ = write!(
                svg,
                "<image x=\"0\" y=\"0\" width=\"{native_w}\" height=\"{native_h}\" preserveAspectRatio=\"xMidYMid slice\" xlink:href=\"{}\"/>",
                escape_xml(src),
            );
        } else {
            tracing::warn!("Skipping background image that is not a data URI");
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let canvas = (native_w as f32, native_h as f32);
    for node in &document.nodes {
        match &node.content {
            NodeContent::Image { src } => render_image(&mut svg, node, src, canvas),
            NodeContent::Text { text } => render_text(&mut svg, node, text, canvas),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn render_image(svg: &mut String, node: &ElementNode, src: &str, canvas: (f32, f32)) {
    if !is_embeddable(src) {
        tracing::warn!("Skipping {} image that is not a data URI", node.element);
        return;
    }
    let width = node.width_percent.unwrap_or(15.0) / 100.0 * canvas.0;
    // Square box; the image keeps its aspect ratio inside it.
    let height = width;
    let (left, top) = anchored_origin(node, width, height, canvas);
    let _ = write!(
        svg,
        "<image x=\"{left}\" y=\"{top}\" width=\"{width}\" height=\"{height}\" preserveAspectRatio=\"xMidYMid meet\" xlink:href=\"{}\"/>",
        escape_xml(src),
    );
}

fn render_text(svg: &mut String, node: &ElementNode, text: &str, canvas: (f32, f32)) {
    let font_size = node.font_size;
    let line_advance = font_size * node.line_height;
    let (pad_x, pad_y) = node.button.as_ref().map_or((0.0, 0.0), |b| {
        (b.padding_x_em * font_size, b.padding_y_em * font_size)
    });

    let box_width = node.width_percent.map(|w| w / 100.0 * canvas.0);
    let lines = match box_width {
        Some(width) if node.wrap => {
            wrap_lines(text, width - 2.0 * pad_x, font_size, node.letter_spacing)
        }
        _ => text.lines().map(str::to_string).collect(),
    };
    let content_width = lines
        .iter()
        .map(|l| line_width(l, font_size, node.letter_spacing))
        .fold(0.0_f32, f32::max);

    let width = box_width.unwrap_or(content_width + 2.0 * pad_x);
    #[allow(clippy::cast_precision_loss)]
    let height = lines.len().max(1) as f32 * line_advance + 2.0 * pad_y;
    let (left, top) = anchored_origin(node, width, height, canvas);

    if let Some(button) = &node.button {
        let fill = button.fill.as_deref().map_or_else(|| "none".to_string(), escape_xml);
        let _ = write!(
            svg,
            "<rect x=\"{left}\" y=\"{top}\" width=\"{width}\" height=\"{height}\" rx=\"{r}\" ry=\"{r}\" fill=\"{fill}\"/>",
            r = button.corner_radius,
        );
    }

    let (text_x, anchor) = match node.text_align {
        TextAlign::Left => (left + pad_x, "start"),
        TextAlign::Center => (left + width / 2.0, "middle"),
        TextAlign::Right => (left + width - pad_x, "end"),
    };

    let _ = write!(
        svg,
        "<text font-family=\"{}\" font-size=\"{font_size}\" fill=\"{}\" text-anchor=\"{anchor}\"",
        escape_xml(&font_stack(&node.font_family)),
        escape_xml(&node.color),
    );
    if node.font_weight == FontWeight::Bold {
        svg.push_str(" font-weight=\"bold\"");
    }
    if node.font_style == FontStyle::Italic {
        svg.push_str(" font-style=\"italic\"");
    }
    if node.text_decoration == TextDecoration::Underline {
        svg.push_str(" text-decoration=\"underline\"");
    }
    if node.letter_spacing.abs() > f32::EPSILON {
        let _ = write!(svg, " letter-spacing=\"{}\"", node.letter_spacing * font_size);
    }
    svg.push('>');

    for (index, line) in lines.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let center = top + pad_y + (index as f32 + 0.5) * line_advance;
        let baseline = center + BASELINE_OFFSET_EM * font_size;
        let _ = write!(
            svg,
            "<tspan x=\"{text_x}\" y=\"{baseline}\">{}</tspan>",
            escape_xml(line),
        );
    }
    svg.push_str("</text>");
}

/// Top-left corner of a box whose anchor sits at the node's position.
fn anchored_origin(node: &ElementNode, width: f32, height: f32, canvas: (f32, f32)) -> (f32, f32) {
    let x = node.left_percent / 100.0 * canvas.0 + node.anchor_x_percent / 100.0 * width;
    let y = node.top_percent / 100.0 * canvas.1 + node.anchor_y_percent / 100.0 * height;
    (x, y)
}

/// Estimated rendered width of one line.
#[allow(clippy::cast_precision_loss)]
fn line_width(line: &str, font_size: f32, letter_spacing_em: f32) -> f32 {
    let glyphs = line.chars().count() as f32;
    glyphs * font_size * (AVG_GLYPH_WIDTH_EM + letter_spacing_em)
}

/// Greedy word wrap to `max_width`. A word wider than the line stays whole.
fn wrap_lines(text: &str, max_width: f32, font_size: f32, letter_spacing_em: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            let fits = line_width(&candidate, font_size, letter_spacing_em) <= max_width;
            if current.is_empty() || fits {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn font_stack(family: &str) -> String {
    format!("'{family}', sans-serif")
}

/// Only inline images are rendered; the renderer never fetches.
fn is_embeddable(src: &str) -> bool {
    src.starts_with("data:image/")
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use poster_core::{
        DesignConcept, GeneratedText, LayoutStyle, PosterVariant, RenderContext, SelectionTracker,
        VariantId, initial_placements, REFERENCE_CANVAS_WIDTH,
    };

    fn document(logo: Option<&str>, image: Option<&str>) -> PosterDocument {
        let id = VariantId::new("instagram", "Post");
        let (platform, size) = id.resolve().expect("catalog");
        let variant = PosterVariant {
            design: DesignConcept {
                background_color: "#123456".to_string(),
                text_color: "#ffffff".to_string(),
                heading_font: "Bebas Neue".to_string(),
                body_font: "Inter".to_string(),
                layout_style: LayoutStyle::Centered,
                image_prompt: String::new(),
            },
            positions: initial_placements(LayoutStyle::Centered, REFERENCE_CANVAS_WIDTH),
        };
        let text = GeneratedText {
            heading: "Fish & Chips <Fri>".to_string(),
            description: "Fresh from the harbour every week, served hot with mushy peas"
                .to_string(),
            cta: "Order".to_string(),
        };
        PosterDocument::build(
            &id,
            platform.name,
            size,
            &variant,
            RenderContext {
                text: &text,
                logo,
                image,
                selection: &SelectionTracker::default(),
            },
        )
    }

    #[test]
    fn test_svg_maps_native_space_to_pixels() {
        let svg = render_svg(&document(None, None), 2160, 2160);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"2160\""));
        assert!(svg.contains("viewBox=\"0 0 1080 1080\""));
        assert!(svg.contains("fill=\"#123456\""));
    }

    #[test]
    fn test_text_is_escaped_and_styled() {
        let svg = render_svg(&document(None, None), 1080, 1080);
        assert!(svg.contains("Fish &amp; Chips &lt;Fri&gt;"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("&apos;Bebas Neue&apos;, sans-serif"));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_cta_draws_rounded_button() {
        let svg = render_svg(&document(None, None), 1080, 1080);
        assert!(svg.contains("rx=\"8\""));
        // Button filled with the text color, label in the background color.
        assert!(svg.contains("fill=\"#ffffff\"/>"));
        assert!(svg.contains("fill=\"#123456\" text-anchor"));
    }

    #[test]
    fn test_remote_images_are_skipped() {
        let svg = render_svg(
            &document(Some("https://cdn.invalid/logo.png"), Some("https://cdn.invalid/bg.png")),
            1080,
            1080,
        );
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn test_inline_images_are_embedded() {
        let svg = render_svg(
            &document(Some("data:image/png;base64,AAAA"), Some("data:image/jpeg;base64,BBBB")),
            1080,
            1080,
        );
        assert!(svg.contains("preserveAspectRatio=\"xMidYMid slice\""));
        assert!(svg.contains("preserveAspectRatio=\"xMidYMid meet\""));
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_lines("one two three four five six", 100.0, 20.0, 0.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line_width(line, 20.0, 0.0) <= 100.0 || !line.contains(' '));
        }
        assert_eq!(lines.join(" "), "one two three four five six");
    }

    #[test]
    fn test_wrap_keeps_long_word_whole() {
        let lines = wrap_lines("supercalifragilistic", 10.0, 20.0, 0.0);
        assert_eq!(lines, vec!["supercalifragilistic".to_string()]);
    }

    #[test]
    fn test_description_wraps_to_multiple_lines() {
        let svg = render_svg(&document(None, None), 1080, 1080);
        let description_lines = svg.matches("<tspan").count();
        // heading 1, cta 1, description at least 2
        assert!(description_lines >= 4);
    }
}
