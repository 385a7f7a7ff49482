//! Pointer input delivered to a rendered poster.

use serde::{Deserialize, Serialize};

use crate::ElementKind;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Any button released.
    Up,
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "element", rename_all = "camelCase")]
pub enum PointerTarget {
    /// The body of an element (starts a drag).
    Element(ElementKind),
    /// The resize handle of a selected element (starts a resize).
    ResizeHandle(ElementKind),
    /// Empty poster background (clears the selection).
    Background,
}

/// On-screen bounding box of a rendered poster, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Rendered width.
    pub width: f32,
    /// Rendered height.
    pub height: f32,
}

impl ScreenRect {
    /// Create a rect.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Client X coordinate.
    pub x: f32,
    /// Client Y coordinate.
    pub y: f32,
    /// Hit target, only meaningful on [`PointerPhase::Down`].
    #[serde(default)]
    pub target: Option<PointerTarget>,
}

impl PointerEvent {
    /// Pointer pressed over `target`.
    #[must_use]
    pub const fn down(target: PointerTarget, x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Down,
            x,
            y,
            target: Some(target),
        }
    }

    /// Pointer moved.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Move,
            x,
            y,
            target: None,
        }
    }

    /// Pointer released.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Up,
            x,
            y,
            target: None,
        }
    }
}
