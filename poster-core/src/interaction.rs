//! Drag/resize state machine for one rendered poster.
//!
//! ```text
//!            down(element)             up
//!   Idle ─────────────────▶ Dragging ─────▶ Idle
//!     │      down(handle)              up
//!     └───────────────────▶ Resizing ─────▶ Idle
//! ```
//!
//! Every move while active yields one [`InteractionUpdate`]; the caller
//! routes it through the edit propagation policy. Release from any state
//! returns to idle, so no gesture outlives its pointer-up.

use serde::{Deserialize, Serialize};

use crate::element::{ElementKind, PlacementPatch};
use crate::event::ScreenRect;

/// Smallest size or font size a resize may produce.
pub const MIN_RESIZE_VALUE: f32 = 0.1;

/// Pixels of horizontal drag per unit of logo scale.
pub const LOGO_RESIZE_SENSITIVITY: f32 = 200.0;

/// Pixels of horizontal drag per pixel of font size.
pub const TEXT_RESIZE_SENSITIVITY: f32 = 100.0;

/// Current gesture of a poster instance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an element with the pointer.
    Dragging {
        /// Element being moved.
        element: ElementKind,
    },
    /// Scaling an element by horizontal pointer travel.
    #[serde(rename_all = "camelCase")]
    Resizing {
        /// Element being resized.
        element: ElementKind,
        /// Pointer X at gesture start.
        start_x: f32,
        /// Pointer Y at gesture start.
        start_y: f32,
        /// Size (logo) or font size (text) at gesture start.
        start_size: f32,
    },
}

/// An element edit produced by a pointer move.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionUpdate {
    /// Element to update.
    pub element: ElementKind,
    /// Fields to merge.
    pub patch: PlacementPatch,
}

/// Pointer-tracking state machine scoped to one poster instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionController {
    state: InteractionState,
    native_width: f32,
    native_height: f32,
}

impl InteractionController {
    /// Create an idle controller for a poster of the given native size.
    #[must_use]
    pub fn new(native_width: f32, native_height: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            native_width,
            native_height,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != InteractionState::Idle
    }

    /// Start dragging `element`. Replaces any gesture in progress.
    pub fn begin_drag(&mut self, element: ElementKind) {
        self.state = InteractionState::Dragging { element };
    }

    /// Start resizing `element` from pointer `(x, y)`.
    ///
    /// `start_size` is the element's current `size` (logo) or `font_size`
    /// (text).
    pub fn begin_resize(&mut self, element: ElementKind, x: f32, y: f32, start_size: f32) {
        self.state = InteractionState::Resizing {
            element,
            start_x: x,
            start_y: y,
            start_size,
        };
    }

    /// Translate a pointer move into an element update.
    ///
    /// `bounds` is the poster's current on-screen box. Returns `None` when
    /// idle, when the poster has no on-screen extent, or when the pointer
    /// position is not finite.
    #[must_use]
    pub fn pointer_move(&self, x: f32, y: f32, bounds: ScreenRect) -> Option<InteractionUpdate> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Dragging { element } => {
                if bounds.width <= 0.0 || self.native_width <= 0.0 || self.native_height <= 0.0 {
                    return None;
                }
                let render_scale = bounds.width / self.native_width;
                let native_x = (x - bounds.left) / render_scale;
                let native_y = (y - bounds.top) / render_scale;
                let x_percent = (native_x / self.native_width * 100.0).clamp(0.0, 100.0);
                let y_percent = (native_y / self.native_height * 100.0).clamp(0.0, 100.0);
                Some(InteractionUpdate {
                    element,
                    patch: PlacementPatch::position(x_percent, y_percent),
                })
            }
            InteractionState::Resizing {
                element,
                start_x,
                start_size,
                ..
            } => Some(InteractionUpdate {
                element,
                patch: PlacementPatch::resize(
                    element,
                    resized_value(element, start_size, x - start_x),
                ),
            }),
        }
    }

    /// End any gesture.
    pub fn pointer_up(&mut self) {
        if self.is_active() {
            tracing::debug!("Ending {:?}", self.state);
        }
        self.state = InteractionState::Idle;
    }
}

/// Size after dragging the resize handle `dx` pixels horizontally.
///
/// Floors at [`MIN_RESIZE_VALUE`].
#[must_use]
pub fn resized_value(element: ElementKind, start_size: f32, dx: f32) -> f32 {
    let sensitivity = if element.is_text() {
        TEXT_RESIZE_SENSITIVITY
    } else {
        LOGO_RESIZE_SENSITIVITY
    };
    (start_size + dx / sensitivity).max(MIN_RESIZE_VALUE)
}
