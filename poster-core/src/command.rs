//! Serializable edit commands.
//!
//! Hosts that cannot call the editor directly (the browser bridge, edit
//! scripts) describe mutations as [`EditCommand`] values. Each command maps
//! onto exactly one editor entry point.

use serde::{Deserialize, Serialize};

use crate::design::{DesignPatch, TextPatch};
use crate::element::{Alignment, ElementKind, PlacementPatch};
use crate::platform::VariantId;

/// One editor mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditCommand {
    /// Patch an element, scoped by the sync toggle.
    #[serde(rename_all = "camelCase")]
    UpdateElement {
        /// Variant the edit originates from.
        variant_id: VariantId,
        /// Element to patch.
        element: ElementKind,
        /// Fields to merge.
        patch: PlacementPatch,
    },
    /// Patch every variant's design.
    UpdateDesign {
        /// Fields to merge.
        patch: DesignPatch,
    },
    /// Patch the shared copy text.
    UpdateText {
        /// Fields to merge.
        patch: TextPatch,
    },
    /// Apply an alignment preset, scoped by the sync toggle.
    #[serde(rename_all = "camelCase")]
    Align {
        /// Variant the edit originates from.
        variant_id: VariantId,
        /// Element to align.
        element: ElementKind,
        /// Preset to apply.
        alignment: Alignment,
    },
    /// Raise an element one step, scoped by the sync toggle.
    #[serde(rename_all = "camelCase")]
    BringForward {
        /// Variant whose stacking order is the starting point.
        variant_id: VariantId,
        /// Element to raise.
        element: ElementKind,
    },
    /// Lower an element one step, scoped by the sync toggle.
    #[serde(rename_all = "camelCase")]
    SendBackward {
        /// Variant whose stacking order is the starting point.
        variant_id: VariantId,
        /// Element to lower.
        element: ElementKind,
    },
    /// Turn sync edits on or off.
    SetSyncEdits {
        /// New toggle value.
        enabled: bool,
    },
    /// Select an element.
    #[serde(rename_all = "camelCase")]
    Select {
        /// Variant holding the element.
        variant_id: VariantId,
        /// Element to select.
        element: ElementKind,
    },
    /// Clear the selection.
    Deselect,
    /// Replace the background image.
    SetGeneratedImage {
        /// New image reference; `None` removes it.
        image: Option<String>,
    },
    /// Replace the logo.
    SetLogo {
        /// New logo reference; `None` removes it.
        logo: Option<String>,
    },
}

/// Parse a JSON array of commands.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or names an unknown command.
pub fn parse_script(json: &str) -> Result<Vec<EditCommand>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_mixed_script() {
        let script = r##"[
            {"op": "setSyncEdits", "enabled": false},
            {"op": "updateElement", "variantId": "instagram-Post", "element": "cta",
             "patch": {"x": 30, "y": 70}},
            {"op": "updateDesign", "patch": {"backgroundColor": "#111111"}},
            {"op": "updateText", "patch": {"cta": "Book now"}},
            {"op": "select", "variantId": "facebook-Post", "element": "heading"},
            {"op": "deselect"}
        ]"##;
        let commands = parse_script(script).expect("parse");
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[0], EditCommand::SetSyncEdits { enabled: false });
        assert_eq!(
            commands[1],
            EditCommand::UpdateElement {
                variant_id: VariantId::new("instagram", "Post"),
                element: ElementKind::Cta,
                patch: PlacementPatch::position(30.0, 70.0),
            }
        );
        assert_eq!(commands[5], EditCommand::Deselect);
    }

    #[test]
    fn test_parses_align_and_layer_commands() {
        let script = r#"[
            {"op": "align", "variantId": "linkedin-Post", "element": "heading",
             "alignment": "right"},
            {"op": "bringForward", "variantId": "linkedin-Post", "element": "logo"},
            {"op": "sendBackward", "variantId": "linkedin-Post", "element": "cta"}
        ]"#;
        let commands = parse_script(script).expect("parse");
        let id = VariantId::new("linkedin", "Post");
        assert_eq!(
            commands,
            vec![
                EditCommand::Align {
                    variant_id: id.clone(),
                    element: ElementKind::Heading,
                    alignment: Alignment::Right,
                },
                EditCommand::BringForward {
                    variant_id: id.clone(),
                    element: ElementKind::Logo,
                },
                EditCommand::SendBackward {
                    variant_id: id,
                    element: ElementKind::Cta,
                },
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_op() {
        assert!(parse_script(r#"[{"op": "undo"}]"#).is_err());
    }
}
