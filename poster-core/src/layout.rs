//! Starting placements for each layout archetype.
//!
//! Font sizes scale linearly with a reference canvas width. Generation
//! always uses [`REFERENCE_CANVAS_WIDTH`], whatever the variant's real
//! width; the renderer interprets the pixel values in each variant's own
//! native space.

use crate::design::LayoutStyle;
use crate::element::{
    ElementPlacement, ElementPlacements, FontStyle, FontWeight, TextAlign, TextDecoration,
};

/// Reference width used when seeding font sizes.
pub const REFERENCE_CANVAS_WIDTH: f32 = 1080.0;

/// Left margin (percent) of the left-aligned archetype.
const LEFT_MARGIN: f32 = 5.0;

/// Column width (percent) of the left-aligned archetype.
const LEFT_CONTENT_WIDTH: f32 = 45.0;

const HEADING_FONT_RATIO: f32 = 0.08;
const DESCRIPTION_FONT_RATIO: f32 = 0.035;
const CTA_FONT_RATIO: f32 = 0.04;

/// Build the starting placements for a layout archetype.
///
/// Every call returns a freshly allocated value; mutating one result never
/// affects another.
#[must_use]
pub fn initial_placements(style: LayoutStyle, reference_width: f32) -> ElementPlacements {
    let mut placements = centered(reference_width);

    match style {
        LayoutStyle::Centered => {}
        LayoutStyle::LeftAlignedImageRight => {
            for (placement, y, width) in [
                (&mut placements.logo, 15.0, Some(15.0)),
                (&mut placements.heading, 40.0, Some(LEFT_CONTENT_WIDTH)),
                (&mut placements.description, 55.0, Some(LEFT_CONTENT_WIDTH)),
                (&mut placements.cta, 70.0, None),
            ] {
                placement.text_align = TextAlign::Left;
                placement.x = LEFT_MARGIN;
                placement.y = y;
                placement.width = width;
            }
        }
        LayoutStyle::ImageTopTextBottom => {
            placements.logo.y = 60.0;
            placements.heading.y = 70.0;
            placements.description.y = 80.0;
            placements.cta.y = 90.0;
        }
    }

    placements
}

fn centered(reference_width: f32) -> ElementPlacements {
    ElementPlacements {
        logo: base(50.0, 15.0, Some(15.0), 40.0, FontWeight::Normal),
        heading: base(
            50.0,
            45.0,
            Some(90.0),
            reference_width * HEADING_FONT_RATIO,
            FontWeight::Bold,
        ),
        description: base(
            50.0,
            55.0,
            Some(80.0),
            reference_width * DESCRIPTION_FONT_RATIO,
            FontWeight::Normal,
        ),
        cta: base(
            50.0,
            65.0,
            None,
            reference_width * CTA_FONT_RATIO,
            FontWeight::Bold,
        ),
    }
}

fn base(
    x: f32,
    y: f32,
    width: Option<f32>,
    font_size: f32,
    font_weight: FontWeight,
) -> ElementPlacement {
    ElementPlacement {
        x,
        y,
        size: 1.0,
        z_index: 10,
        width,
        font_size,
        color: None,
        text_align: TextAlign::Center,
        font_weight,
        font_style: FontStyle::Normal,
        text_decoration: TextDecoration::None,
        letter_spacing: 0.0,
        line_height: 1.2,
    }
}
