//! WebAssembly bindings for poster-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Structured values cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::{
    EditCommand, EditorState, ElementKind, GenerationResult, PointerEvent, ScreenRect, VariantId,
};

/// Initialize the poster editor WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Poster editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    state: EditorState,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor with the default platform selection.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: EditorState::new(),
        }
    }

    /// Seed the editor from a generation result the host fetched itself.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is not a generation result or a
    /// generation is already in progress.
    #[wasm_bindgen(js_name = loadGenerationResult)]
    pub fn load_generation_result(&mut self, prompt: &str, json: &str) -> Result<(), String> {
        let result: GenerationResult = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let ticket = self
            .state
            .begin_generation(prompt, None)
            .map_err(|e| e.to_string())?;
        self.state
            .complete_generation(ticket, Ok(result))
            .map_err(|e| e.to_string())
    }

    /// Feed a pointer event from one rendered poster.
    ///
    /// # Errors
    ///
    /// Returns an error string if the event JSON is malformed.
    #[wasm_bindgen(js_name = pointerEvent)]
    pub fn pointer_event(
        &mut self,
        variant_id: &str,
        event_json: &str,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
    ) -> Result<(), String> {
        let event: PointerEvent = serde_json::from_str(event_json).map_err(|e| e.to_string())?;
        self.state.handle_pointer(
            &VariantId::from(variant_id),
            &event,
            ScreenRect::new(left, top, width, height),
        );
        Ok(())
    }

    /// Apply an edit command serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the command JSON is malformed.
    #[wasm_bindgen(js_name = applyCommand)]
    pub fn apply_command(&mut self, json: &str) -> Result<(), String> {
        let command: EditCommand = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.state.apply(&command);
        Ok(())
    }

    /// Select an element by variant id and element name.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown element name.
    pub fn select(&mut self, variant_id: &str, element: &str) -> Result<(), String> {
        let kind: ElementKind =
            serde_json::from_value(serde_json::Value::String(element.to_string()))
                .map_err(|e| e.to_string())?;
        self.state.select(&VariantId::from(variant_id), Some(kind));
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.state.deselect();
    }

    /// Turn sync edits on or off.
    #[wasm_bindgen(js_name = setSyncEdits)]
    pub fn set_sync_edits(&mut self, enabled: bool) {
        self.state.set_sync_edits(enabled);
    }

    /// Whether sync edits are on.
    #[wasm_bindgen(js_name = syncEdits)]
    #[must_use]
    pub fn sync_edits(&self) -> bool {
        self.state.sync_edits()
    }

    /// Flip one platform/size toggle.
    #[wasm_bindgen(js_name = togglePlatform)]
    pub fn toggle_platform(&mut self, platform: &str, size: &str) {
        self.state.toggle_platform(platform, size);
    }

    /// Replace the logo with a data URI or URL. Empty removes it.
    #[wasm_bindgen(js_name = setLogo)]
    pub fn set_logo(&mut self, logo: &str) {
        self.state
            .set_logo((!logo.is_empty()).then(|| logo.to_string()));
    }

    /// Whether a generation is in flight.
    #[wasm_bindgen(js_name = isLoading)]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Message from the last failed generation.
    #[wasm_bindgen(js_name = errorMessage)]
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.state.error().map(str::to_string)
    }

    /// Render trees of every selected poster as a JSON array.
    #[wasm_bindgen(js_name = renderedPostersJson)]
    #[must_use]
    pub fn rendered_posters_json(&self) -> String {
        serde_json::to_string(&self.state.rendered_posters()).unwrap_or_default()
    }

    /// Current selection as JSON, `null` when nothing is selected.
    #[wasm_bindgen(js_name = selectionJson)]
    #[must_use]
    pub fn selection_json(&self) -> String {
        serde_json::to_string(&self.state.selection()).unwrap_or_default()
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}
