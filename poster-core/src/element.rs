//! Poster elements and their per-variant placement.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The four visual elements every poster carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Brand logo image.
    Logo,
    /// Headline text.
    Heading,
    /// Body copy.
    Description,
    /// Call-to-action button.
    Cta,
}

impl ElementKind {
    /// All element kinds, in paint order of the default layouts.
    pub const ALL: [Self; 4] = [Self::Logo, Self::Heading, Self::Description, Self::Cta];

    /// Stable lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Heading => "heading",
            Self::Description => "description",
            Self::Cta => "cta",
        }
    }

    /// Whether this element is a text element (everything but the logo).
    #[must_use]
    pub const fn is_text(self) -> bool {
        !matches!(self, Self::Logo)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal text alignment. Also decides the element's horizontal anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Anchor at the left edge.
    Left,
    /// Anchor at the horizontal center.
    #[default]
    Center,
    /// Anchor at the right edge.
    Right,
}

/// Font weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Font style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Text decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    /// No decoration.
    #[default]
    None,
    /// Underlined.
    Underline,
}

/// Alignment preset from the element panel.
///
/// Horizontal presets move the anchor to a 5% margin or the center and set
/// the matching text alignment. Vertical presets only move `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// `x = 5`, left aligned.
    Left,
    /// `x = 50`, centered.
    Center,
    /// `x = 95`, right aligned.
    Right,
    /// `y = 5`.
    Top,
    /// `y = 50`.
    Middle,
    /// `y = 95`.
    Bottom,
}

/// Geometry and typography of one element on one poster variant.
///
/// `x`/`y` are percentages of the canvas width/height and address the
/// element's anchor point (see [`TextAlign`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPlacement {
    /// Horizontal position, percent of canvas width.
    pub x: f32,
    /// Vertical position, percent of canvas height.
    pub y: f32,
    /// Scale multiplier (used by the logo).
    pub size: f32,
    /// Stacking order; only relative ordering matters.
    pub z_index: i32,
    /// Box width as percent of canvas width; `None` means intrinsic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Color override; `None` inherits the design's text color.
    pub color: Option<String>,
    /// Text alignment.
    pub text_align: TextAlign,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font style.
    pub font_style: FontStyle,
    /// Text decoration.
    pub text_decoration: TextDecoration,
    /// Letter spacing in em.
    pub letter_spacing: f32,
    /// Line height multiplier.
    pub line_height: f32,
}

impl ElementPlacement {
    /// Merge a partial update over this placement.
    ///
    /// Only fields present in the patch change.
    pub fn apply(&mut self, patch: &PlacementPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
        if let Some(text_align) = patch.text_align {
            self.text_align = text_align;
        }
        if let Some(font_weight) = patch.font_weight {
            self.font_weight = font_weight;
        }
        if let Some(font_style) = patch.font_style {
            self.font_style = font_style;
        }
        if let Some(text_decoration) = patch.text_decoration {
            self.text_decoration = text_decoration;
        }
        if let Some(letter_spacing) = patch.letter_spacing {
            self.letter_spacing = letter_spacing;
        }
        if let Some(line_height) = patch.line_height {
            self.line_height = line_height;
        }
    }

    /// The value a resize gesture scales: `size` for the logo, `font_size`
    /// for text.
    #[must_use]
    pub fn resize_value(&self, kind: ElementKind) -> f32 {
        if kind.is_text() {
            self.font_size
        } else {
            self.size
        }
    }
}

/// The full set of placements for one poster variant.
///
/// Exactly one placement per [`ElementKind`], enforced by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementPlacements {
    /// Logo placement.
    pub logo: ElementPlacement,
    /// Heading placement.
    pub heading: ElementPlacement,
    /// Description placement.
    pub description: ElementPlacement,
    /// Call-to-action placement.
    pub cta: ElementPlacement,
}

impl ElementPlacements {
    /// Placement for an element kind.
    #[must_use]
    pub fn get(&self, kind: ElementKind) -> &ElementPlacement {
        match kind {
            ElementKind::Logo => &self.logo,
            ElementKind::Heading => &self.heading,
            ElementKind::Description => &self.description,
            ElementKind::Cta => &self.cta,
        }
    }

    /// Mutable placement for an element kind.
    pub fn get_mut(&mut self, kind: ElementKind) -> &mut ElementPlacement {
        match kind {
            ElementKind::Logo => &mut self.logo,
            ElementKind::Heading => &mut self.heading,
            ElementKind::Description => &mut self.description,
            ElementKind::Cta => &mut self.cta,
        }
    }

    /// Iterate `(kind, placement)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ElementKind, &ElementPlacement)> {
        ElementKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// A partial update to an [`ElementPlacement`].
///
/// Absent fields are left untouched. For the nullable fields (`width`,
/// `color`) an explicit JSON `null` clears the value back to auto/inherit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct PlacementPatch {
    /// New x position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// New y position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// New scale multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    /// New stacking order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// New box width; `Some(None)` resets to intrinsic.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<Option<f32>>,
    /// New font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// New color override; `Some(None)` inherits the design color again.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Option<String>>,
    /// New alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// New weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    /// New style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    /// New decoration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    /// New letter spacing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    /// New line height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
}

impl PlacementPatch {
    /// A patch moving the element to `(x, y)`.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch setting the value a resize gesture controls for `kind`.
    #[must_use]
    pub fn resize(kind: ElementKind, value: f32) -> Self {
        if kind.is_text() {
            Self {
                font_size: Some(value),
                ..Self::default()
            }
        } else {
            Self {
                size: Some(value),
                ..Self::default()
            }
        }
    }

    /// A patch applying an alignment preset.
    #[must_use]
    pub fn align(alignment: Alignment) -> Self {
        let horizontal = |x: f32, text_align: TextAlign| Self {
            x: Some(x),
            text_align: Some(text_align),
            ..Self::default()
        };
        let vertical = |y: f32| Self {
            y: Some(y),
            ..Self::default()
        };
        match alignment {
            Alignment::Left => horizontal(5.0, TextAlign::Left),
            Alignment::Center => horizontal(50.0, TextAlign::Center),
            Alignment::Right => horizontal(95.0, TextAlign::Right),
            Alignment::Top => vertical(5.0),
            Alignment::Middle => vertical(50.0),
            Alignment::Bottom => vertical(95.0),
        }
    }

    /// A patch setting the stacking order.
    #[must_use]
    pub fn z_index(z_index: i32) -> Self {
        Self {
            z_index: Some(z_index),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Distinguishes a missing field (`None`) from an explicit `null` (`Some(None)`).
#[allow(clippy::option_option)]
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
