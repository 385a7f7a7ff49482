//! Single-element selection tracking.

use serde::{Deserialize, Serialize};

use crate::element::ElementKind;
use crate::platform::VariantId;

/// The `(variant, element)` pair being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionKey {
    /// Variant holding the element.
    pub variant_id: VariantId,
    /// Selected element.
    pub element: ElementKind,
}

/// Holds at most one selection. Selecting replaces; there is no multi-select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTracker {
    current: Option<SelectionKey>,
}

impl SelectionTracker {
    /// Select an element, or clear the selection when `element` is `None`.
    pub fn select(&mut self, variant_id: &VariantId, element: Option<ElementKind>) {
        self.current = element.map(|element| SelectionKey {
            variant_id: variant_id.clone(),
            element,
        });
        tracing::debug!("Selection now {:?}", self.current);
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.current = None;
    }

    /// The current selection.
    #[must_use]
    pub fn current(&self) -> Option<&SelectionKey> {
        self.current.as_ref()
    }

    /// Whether `element` on `variant_id` is the selected pair.
    #[must_use]
    pub fn is_selected(&self, variant_id: &VariantId, element: ElementKind) -> bool {
        self.current
            .as_ref()
            .is_some_and(|key| key.variant_id == *variant_id && key.element == element)
    }
}
