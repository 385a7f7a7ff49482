//! Fully-resolved render tree for one poster variant.
//!
//! Hosts draw previews from it and exporters capture it. All style
//! inheritance (colors, fonts, default widths, button styling) is resolved
//! here so consumers never look at the design concept directly.

use serde::{Deserialize, Serialize};

use crate::design::GeneratedText;
use crate::element::{
    ElementKind, ElementPlacement, FontStyle, FontWeight, TextAlign, TextDecoration,
};
use crate::platform::{PlatformSize, VariantId};
use crate::selection::SelectionTracker;
use crate::store::PosterVariant;

/// On-screen preview width of every poster, in client pixels.
pub const PREVIEW_WIDTH: f32 = 350.0;

const DEFAULT_LOGO_WIDTH: f32 = 15.0;
const DEFAULT_HEADING_WIDTH: f32 = 90.0;
const DEFAULT_DESCRIPTION_WIDTH: f32 = 80.0;

/// What an element node draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeContent {
    /// A block of text; `\n` separates lines.
    Text {
        /// Text to draw.
        text: String,
    },
    /// An image reference.
    Image {
        /// URL or data URI.
        src: String,
    },
}

/// Button chrome drawn behind the call to action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    /// Fill color; `None` is transparent.
    pub fill: Option<String>,
    /// Vertical padding in em.
    pub padding_y_em: f32,
    /// Horizontal padding in em.
    pub padding_x_em: f32,
    /// Corner radius in native pixels.
    pub corner_radius: f32,
}

/// One positioned, styled element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    /// Which element this is.
    pub element: ElementKind,
    /// What to draw.
    pub content: NodeContent,
    /// Anchor X, percent of canvas width.
    pub left_percent: f32,
    /// Anchor Y, percent of canvas height.
    pub top_percent: f32,
    /// Horizontal offset of the box relative to the anchor, percent of box width.
    pub anchor_x_percent: f32,
    /// Vertical offset of the box relative to the anchor, percent of box height.
    pub anchor_y_percent: f32,
    /// Box width, percent of canvas width; `None` is intrinsic.
    pub width_percent: Option<f32>,
    /// Stacking order.
    pub z_index: i32,
    /// Resolved font family.
    pub font_family: String,
    /// Font size in native pixels.
    pub font_size: f32,
    /// Resolved text color.
    pub color: String,
    /// Alignment.
    pub text_align: TextAlign,
    /// Weight.
    pub font_weight: FontWeight,
    /// Style.
    pub font_style: FontStyle,
    /// Decoration.
    pub text_decoration: TextDecoration,
    /// Letter spacing in em.
    pub letter_spacing: f32,
    /// Line height multiplier.
    pub line_height: f32,
    /// Whether text wraps inside the box.
    pub wrap: bool,
    /// Button chrome (call to action only).
    pub button: Option<ButtonStyle>,
    /// Whether this is the selected element.
    pub selected: bool,
}

/// Render tree of one poster variant at native resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterDocument {
    /// Variant identifier.
    pub variant_id: VariantId,
    /// Platform display name.
    pub platform_name: String,
    /// Size name.
    pub size_name: String,
    /// Native width in pixels.
    pub width: u32,
    /// Native height in pixels.
    pub height: u32,
    /// Scale of the on-screen preview relative to native size.
    pub preview_scale: f32,
    /// Canvas background color.
    pub background_color: String,
    /// Cover-fitted background image.
    pub background_image: Option<String>,
    /// Visible elements, sorted by z-index.
    pub nodes: Vec<ElementNode>,
}

/// Inputs shared by every variant's render tree.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Shared copy text.
    pub text: &'a GeneratedText,
    /// Logo reference; the logo node is omitted without one.
    pub logo: Option<&'a str>,
    /// Background image reference.
    pub image: Option<&'a str>,
    /// Current selection.
    pub selection: &'a SelectionTracker,
}

impl PosterDocument {
    /// Build the render tree for one variant.
    #[must_use]
    pub fn build(
        variant_id: &VariantId,
        platform_name: &str,
        size: &PlatformSize,
        variant: &PosterVariant,
        ctx: RenderContext<'_>,
    ) -> Self {
        let design = &variant.design;
        let positions = &variant.positions;

        let mut nodes = Vec::with_capacity(4);
        if let Some(logo) = ctx.logo {
            let logo_placement = &positions.logo;
            let mut node = element_node(
                variant_id,
                ElementKind::Logo,
                logo_placement,
                NodeContent::Image {
                    src: logo.to_string(),
                },
                &design.heading_font,
                &design.body_font,
                &design.text_color,
                ctx.selection,
            );
            node.width_percent = Some(
                box_width(logo_placement.width).unwrap_or(DEFAULT_LOGO_WIDTH) * logo_placement.size,
            );
            nodes.push(node);
        }

        for (kind, content, default_width) in [
            (ElementKind::Heading, &ctx.text.heading, Some(DEFAULT_HEADING_WIDTH)),
            (ElementKind::Description, &ctx.text.description, Some(DEFAULT_DESCRIPTION_WIDTH)),
            (ElementKind::Cta, &ctx.text.cta, None),
        ] {
            let placement = positions.get(kind);
            let mut node = element_node(
                variant_id,
                kind,
                placement,
                NodeContent::Text {
                    text: content.clone(),
                },
                &design.heading_font,
                &design.body_font,
                &design.text_color,
                ctx.selection,
            );
            node.width_percent = default_width.map(|w| box_width(placement.width).unwrap_or(w));

            if kind == ElementKind::Cta {
                let (fill, color) = match &placement.color {
                    Some(color) => (None, color.clone()),
                    None => (
                        Some(design.text_color.clone()),
                        design.background_color.clone(),
                    ),
                };
                node.color = color;
                node.wrap = false;
                node.button = Some(ButtonStyle {
                    fill,
                    padding_y_em: 0.75,
                    padding_x_em: 1.5,
                    corner_radius: 8.0,
                });
            }
            nodes.push(node);
        }

        nodes.sort_by_key(|n| n.z_index);

        #[allow(clippy::cast_precision_loss)]
        let preview_scale = PREVIEW_WIDTH / size.width.max(1) as f32;

        Self {
            variant_id: variant_id.clone(),
            platform_name: platform_name.to_string(),
            size_name: size.name.to_string(),
            width: size.width,
            height: size.height,
            preview_scale,
            background_color: design.background_color.clone(),
            background_image: ctx.image.map(str::to_string),
            nodes,
        }
    }

    /// Node for an element, if it is visible.
    #[must_use]
    pub fn node(&self, element: ElementKind) -> Option<&ElementNode> {
        self.nodes.iter().find(|n| n.element == element)
    }
}

/// A box width of zero or less means "use the default".
fn box_width(width: Option<f32>) -> Option<f32> {
    width.filter(|w| *w > 0.0)
}

#[allow(clippy::too_many_arguments)]
fn element_node(
    variant_id: &VariantId,
    element: ElementKind,
    placement: &ElementPlacement,
    content: NodeContent,
    heading_font: &str,
    body_font: &str,
    text_color: &str,
    selection: &SelectionTracker,
) -> ElementNode {
    // Side-aligned text uses the body face, centered text the heading face.
    let font_family = match placement.text_align {
        TextAlign::Left | TextAlign::Right => body_font,
        TextAlign::Center => heading_font,
    };
    let anchor_x_percent = match placement.text_align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -50.0,
        TextAlign::Right => -100.0,
    };

    ElementNode {
        element,
        content,
        left_percent: placement.x,
        top_percent: placement.y,
        anchor_x_percent,
        anchor_y_percent: -50.0,
        width_percent: placement.width,
        z_index: placement.z_index,
        font_family: font_family.to_string(),
        font_size: placement.font_size,
        color: placement
            .color
            .clone()
            .unwrap_or_else(|| text_color.to_string()),
        text_align: placement.text_align,
        font_weight: placement.font_weight,
        font_style: placement.font_style,
        text_decoration: placement.text_decoration,
        letter_spacing: placement.letter_spacing,
        line_height: placement.line_height,
        wrap: true,
        button: None,
        selected: selection.is_selected(variant_id, element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{DesignConcept, LayoutStyle};
    use crate::layout::{initial_placements, REFERENCE_CANVAS_WIDTH};

    fn variant(layout_style: LayoutStyle) -> PosterVariant {
        PosterVariant {
            design: DesignConcept {
                background_color: "#101820".to_string(),
                text_color: "#FEE715".to_string(),
                heading_font: "Anton".to_string(),
                body_font: "Lato".to_string(),
                layout_style,
                image_prompt: String::new(),
            },
            positions: initial_placements(layout_style, REFERENCE_CANVAS_WIDTH),
        }
    }

    fn text() -> GeneratedText {
        GeneratedText {
            heading: "Ship faster".to_string(),
            description: "Automate the boring parts.".to_string(),
            cta: "Try it".to_string(),
        }
    }

    fn build(
        variant: &PosterVariant,
        logo: Option<&str>,
        selection: &SelectionTracker,
    ) -> PosterDocument {
        let id = VariantId::new("instagram", "Post");
        let (platform, size) = id.resolve().expect("catalog");
        let text = text();
        PosterDocument::build(
            &id,
            platform.name,
            size,
            variant,
            RenderContext {
                text: &text,
                logo,
                image: Some("data:image/png;base64,AAAA"),
                selection,
            },
        )
    }

    #[test]
    fn test_logo_node_only_with_logo() {
        let selection = SelectionTracker::default();
        let doc = build(&variant(LayoutStyle::Centered), None, &selection);
        assert_eq!(doc.nodes.len(), 3);
        assert!(doc.node(ElementKind::Logo).is_none());

        let doc = build(&variant(LayoutStyle::Centered), Some("logo.png"), &selection);
        assert_eq!(doc.nodes.len(), 4);
        let logo = doc.node(ElementKind::Logo).expect("logo");
        assert_eq!(logo.width_percent, Some(15.0));
    }

    #[test]
    fn test_resolves_fonts_colors_and_anchors() {
        let selection = SelectionTracker::default();
        let doc = build(&variant(LayoutStyle::Centered), None, &selection);
        let heading = doc.node(ElementKind::Heading).expect("heading");
        assert_eq!(heading.font_family, "Anton");
        assert_eq!(heading.color, "#FEE715");
        assert!((heading.anchor_x_percent + 50.0).abs() < f32::EPSILON);
        assert_eq!(heading.width_percent, Some(90.0));

        let doc = build(&variant(LayoutStyle::LeftAlignedImageRight), None, &selection);
        let description = doc.node(ElementKind::Description).expect("description");
        assert_eq!(description.font_family, "Lato");
        assert!(description.anchor_x_percent.abs() < f32::EPSILON);
        assert_eq!(description.width_percent, Some(45.0));
    }

    #[test]
    fn test_zero_width_falls_back_to_default() {
        let selection = SelectionTracker::default();
        let mut v = variant(LayoutStyle::Centered);
        v.positions.logo.width = Some(0.0);
        v.positions.heading.width = Some(0.0);
        v.positions.description.width = Some(-5.0);
        let doc = build(&v, Some("logo.png"), &selection);

        assert_eq!(doc.node(ElementKind::Logo).and_then(|n| n.width_percent), Some(15.0));
        assert_eq!(
            doc.node(ElementKind::Heading).and_then(|n| n.width_percent),
            Some(90.0)
        );
        assert_eq!(
            doc.node(ElementKind::Description).and_then(|n| n.width_percent),
            Some(80.0)
        );
    }

    #[test]
    fn test_cta_inverts_colors_unless_overridden() {
        let selection = SelectionTracker::default();
        let mut v = variant(LayoutStyle::Centered);
        let doc = build(&v, None, &selection);
        let cta = doc.node(ElementKind::Cta).expect("cta");
        assert_eq!(cta.color, "#101820");
        assert_eq!(
            cta.button.as_ref().and_then(|b| b.fill.as_deref()),
            Some("#FEE715")
        );
        assert!(!cta.wrap);
        assert!(cta.width_percent.is_none());

        v.positions.cta.color = Some("#FFFFFF".to_string());
        let doc = build(&v, None, &selection);
        let cta = doc.node(ElementKind::Cta).expect("cta");
        assert_eq!(cta.color, "#FFFFFF");
        assert!(cta.button.as_ref().is_some_and(|b| b.fill.is_none()));
    }

    #[test]
    fn test_marks_selected_node_and_preview_scale() {
        let mut selection = SelectionTracker::default();
        selection.select(&VariantId::new("instagram", "Post"), Some(ElementKind::Heading));
        let doc = build(&variant(LayoutStyle::Centered), None, &selection);
        assert!(doc.node(ElementKind::Heading).is_some_and(|n| n.selected));
        assert!(doc.node(ElementKind::Cta).is_some_and(|n| !n.selected));
        assert!((doc.preview_scale - 350.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_nodes_follow_z_index() {
        let selection = SelectionTracker::default();
        let mut v = variant(LayoutStyle::Centered);
        v.positions.heading.z_index = 1;
        let doc = build(&v, None, &selection);
        assert_eq!(doc.nodes[0].element, ElementKind::Heading);
    }
}
