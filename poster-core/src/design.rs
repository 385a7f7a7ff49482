//! Design concept, copy text, and the partial updates applied to them.

use serde::{Deserialize, Serialize};

/// Font families a design concept may reference.
pub const KNOWN_FONTS: [&str; 19] = [
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Oswald",
    "Source Sans Pro",
    "Raleway",
    "Poppins",
    "Inter",
    "Playfair Display",
    "Merriweather",
    "Nunito",
    "Roboto Condensed",
    "Ubuntu",
    "Lobster",
    "Pacifico",
    "Anton",
    "Bebas Neue",
    "Archivo",
];

/// Starting arrangement used to seed element placements.
///
/// Unknown names deserialize to [`LayoutStyle::Centered`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum LayoutStyle {
    /// Everything stacked on the vertical center line.
    #[default]
    Centered,
    /// Left column of copy, right side reserved for imagery.
    LeftAlignedImageRight,
    /// Image band on top, copy compressed into the lower half.
    ImageTopTextBottom,
}

impl LayoutStyle {
    /// All layout styles.
    pub const ALL: [Self; 3] = [
        Self::Centered,
        Self::LeftAlignedImageRight,
        Self::ImageTopTextBottom,
    ];

    /// Wire name of the style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Centered => "centered",
            Self::LeftAlignedImageRight => "left-aligned-image-right",
            Self::ImageTopTextBottom => "image-top-text-bottom",
        }
    }
}

impl From<&str> for LayoutStyle {
    fn from(value: &str) -> Self {
        match value {
            "left-aligned-image-right" => Self::LeftAlignedImageRight,
            "image-top-text-bottom" => Self::ImageTopTextBottom,
            "centered" => Self::Centered,
            other => {
                tracing::warn!("Unknown layout style {other:?}, falling back to centered");
                Self::Centered
            }
        }
    }
}

impl From<String> for LayoutStyle {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Colors, fonts and layout decided at generation time.
///
/// Every variant holds its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignConcept {
    /// Canvas background color (hex).
    pub background_color: String,
    /// Default text color (hex).
    pub text_color: String,
    /// Heading font family.
    pub heading_font: String,
    /// Body font family.
    pub body_font: String,
    /// Layout archetype; fixed after creation.
    #[serde(default)]
    pub layout_style: LayoutStyle,
    /// Prompt used for the background image, kept for provenance.
    #[serde(default)]
    pub image_prompt: String,
}

impl DesignConcept {
    /// Merge a partial design update.
    pub fn apply(&mut self, patch: &DesignPatch) {
        if let Some(color) = &patch.background_color {
            self.background_color.clone_from(color);
        }
        if let Some(color) = &patch.text_color {
            self.text_color.clone_from(color);
        }
        if let Some(font) = &patch.heading_font {
            self.heading_font.clone_from(font);
        }
        if let Some(font) = &patch.body_font {
            self.body_font.clone_from(font);
        }
    }

    /// Basic shape checks on colors and fonts.
    ///
    /// Returns one human-readable note per problem. Callers log these;
    /// nothing is rejected.
    #[must_use]
    pub fn shape_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (field, value) in [
            ("backgroundColor", &self.background_color),
            ("textColor", &self.text_color),
        ] {
            if !is_hex_color(value) {
                warnings.push(format!("{field} {value:?} is not a hex color"));
            }
        }
        for (field, value) in [
            ("headingFont", &self.heading_font),
            ("bodyFont", &self.body_font),
        ] {
            if !is_known_font(value) {
                warnings.push(format!("{field} {value:?} is not a known font"));
            }
        }
        warnings
    }
}

/// A partial update to a [`DesignConcept`].
///
/// Layout style and image prompt are fixed at generation time and cannot
/// be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignPatch {
    /// New background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// New text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// New heading font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    /// New body font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
}

/// Marketing copy shared by every variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    /// Headline.
    pub heading: String,
    /// Body copy.
    pub description: String,
    /// Call to action.
    pub cta: String,
}

impl GeneratedText {
    /// Merge a partial text update.
    pub fn apply(&mut self, patch: &TextPatch) {
        if let Some(heading) = &patch.heading {
            self.heading.clone_from(heading);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(cta) = &patch.cta {
            self.cta.clone_from(cta);
        }
    }
}

/// A partial update to [`GeneratedText`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPatch {
    /// New headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// New body copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New call to action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

/// `#RGB` or `#RRGGBB`.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Whether `font` is one of [`KNOWN_FONTS`].
#[must_use]
pub fn is_known_font(font: &str) -> bool {
    KNOWN_FONTS.contains(&font)
}
