//! Editor state and its mutation entry points.
//!
//! [`EditorState`] owns everything the poster editor knows: the variant
//! store, the shared copy text, images, the selection, the sync toggle and
//! per-poster interaction controllers. Rendering reads from it through
//! [`EditorState::render_document`]; every write goes through one of the
//! methods below.

use std::collections::HashMap;

use crate::command::EditCommand;
use crate::design::{DesignPatch, GeneratedText, TextPatch};
use crate::element::{Alignment, ElementKind, PlacementPatch};
use crate::error::{EditorError, EditorResult, GenerationError};
use crate::event::{PointerEvent, PointerPhase, PointerTarget, ScreenRect};
use crate::export::{ExportArtifact, ExportFormat, ExportGuard, ExportRequest, PosterExporter};
use crate::generation::{GenerationPhase, GenerationResult, GenerationTicket, PosterGenerator};
use crate::interaction::{InteractionController, InteractionState};
use crate::platform::{PlatformSelection, VariantId};
use crate::schema::{PosterDocument, RenderContext};
use crate::selection::{SelectionKey, SelectionTracker};
use crate::store::{EditScope, PosterStore};

/// The complete editor state.
#[derive(Debug)]
pub struct EditorState {
    store: Option<PosterStore>,
    text: Option<GeneratedText>,
    image: Option<String>,
    logo: Option<String>,
    error: Option<String>,
    phase: GenerationPhase,
    sync_edits: bool,
    selection: SelectionTracker,
    platforms: PlatformSelection,
    cycle: u64,
    controllers: HashMap<VariantId, InteractionController>,
    exporting: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            store: None,
            text: None,
            image: None,
            logo: None,
            error: None,
            phase: GenerationPhase::Idle,
            sync_edits: true,
            selection: SelectionTracker::default(),
            platforms: PlatformSelection::default(),
            cycle: 0,
            controllers: HashMap::new(),
            exporting: None,
        }
    }
}

impl EditorState {
    /// Create an editor with the default platform selection and sync on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor with a custom platform selection.
    #[must_use]
    pub fn with_platforms(platforms: PlatformSelection) -> Self {
        Self {
            platforms,
            ..Self::default()
        }
    }

    // ----- generation -------------------------------------------------

    /// Start a generation cycle.
    ///
    /// Discards the store, text, image, selection and any gesture in
    /// progress, then enters [`GenerationPhase::Generating`].
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::GenerationInProgress`] while another cycle is
    /// in flight.
    pub fn begin_generation(
        &mut self,
        prompt: &str,
        background_image: Option<String>,
    ) -> EditorResult<GenerationTicket> {
        if self.phase == GenerationPhase::Generating {
            tracing::warn!("Rejected generation request: cycle {} in flight", self.cycle);
            return Err(EditorError::GenerationInProgress);
        }

        self.cycle += 1;
        self.store = None;
        self.text = None;
        self.image = None;
        self.error = None;
        self.selection.deselect();
        self.controllers.clear();
        self.phase = GenerationPhase::Generating;
        tracing::info!("Starting generation cycle {}", self.cycle);

        Ok(GenerationTicket {
            cycle: self.cycle,
            prompt: prompt.to_string(),
            background_image,
        })
    }

    /// Finish a generation cycle with the collaborator's outcome.
    ///
    /// On success one variant is seeded per selected platform/size. On
    /// failure the message is recorded and the store stays empty. A ticket
    /// from a superseded cycle is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Generation`] when `outcome` is a failure.
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<GenerationResult, GenerationError>,
    ) -> EditorResult<()> {
        if ticket.cycle != self.cycle || self.phase != GenerationPhase::Generating {
            tracing::debug!(
                "Ignoring stale completion for cycle {} (current {})",
                ticket.cycle,
                self.cycle
            );
            return Ok(());
        }

        match outcome {
            Ok(result) => {
                for warning in result.design.shape_warnings() {
                    tracing::warn!("{warning}");
                }
                let variants = self.platforms.selected_variants();
                let store = PosterStore::seed(variants, &result.design);
                tracing::info!(
                    "Generation cycle {} ready with {} variants ({} layout)",
                    self.cycle,
                    store.len(),
                    result.design.layout_style.as_str()
                );
                self.store = Some(store);
                self.text = Some(result.text);
                self.image = Some(result.image);
                self.phase = GenerationPhase::Ready;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Generation cycle {} failed: {err}", self.cycle);
                self.store = None;
                self.error = Some(err.message().to_string());
                self.phase = GenerationPhase::Failed;
                Err(EditorError::Generation(err))
            }
        }
    }

    /// Run one full generation cycle against `generator`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::GenerationInProgress`] if a cycle is already
    /// running, or [`EditorError::Generation`] if the collaborator fails.
    pub async fn generate(
        &mut self,
        generator: &dyn PosterGenerator,
        prompt: &str,
        background_image: Option<String>,
    ) -> EditorResult<()> {
        let ticket = self.begin_generation(prompt, background_image)?;
        let outcome = generator
            .generate(ticket.prompt(), ticket.background_image())
            .await;
        self.complete_generation(ticket, outcome)
    }

    /// Drop all generated content and return to idle.
    ///
    /// Any outstanding ticket becomes stale.
    pub fn reset(&mut self) {
        self.cycle += 1;
        self.store = None;
        self.text = None;
        self.image = None;
        self.error = None;
        self.selection.deselect();
        self.controllers.clear();
        self.phase = GenerationPhase::Idle;
        tracing::debug!("Editor reset (cycle {})", self.cycle);
    }

    /// Current generation phase.
    #[must_use]
    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Whether a generation cycle is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == GenerationPhase::Generating
    }

    /// Message from the last failed generation.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ----- edits ------------------------------------------------------

    /// Merge `patch` into `element`, on every variant when sync is on or
    /// on `variant_id` alone when it is off.
    ///
    /// Returns the number of variants changed. Without a store this is a
    /// no-op.
    pub fn update_element(
        &mut self,
        variant_id: &VariantId,
        element: ElementKind,
        patch: &PlacementPatch,
    ) -> usize {
        let scope = EditScope::from_sync(self.sync_edits);
        match self.store.as_mut() {
            Some(store) => store.update_element(variant_id, element, patch, scope),
            None => {
                tracing::debug!("Ignoring {element} update: no posters");
                0
            }
        }
    }

    /// Apply an alignment preset to `element`, scoped like
    /// [`Self::update_element`].
    pub fn align(
        &mut self,
        variant_id: &VariantId,
        element: ElementKind,
        alignment: Alignment,
    ) -> usize {
        self.update_element(variant_id, element, &PlacementPatch::align(alignment))
    }

    /// Raise `element` one step above its stacking order on `variant_id`.
    ///
    /// Under sync every variant receives that poster's new value.
    pub fn bring_forward(&mut self, variant_id: &VariantId, element: ElementKind) -> usize {
        self.shift_layer(variant_id, element, 1)
    }

    /// Lower `element` one step below its stacking order on `variant_id`.
    pub fn send_backward(&mut self, variant_id: &VariantId, element: ElementKind) -> usize {
        self.shift_layer(variant_id, element, -1)
    }

    fn shift_layer(&mut self, variant_id: &VariantId, element: ElementKind, delta: i32) -> usize {
        let Some(current) = self
            .store
            .as_ref()
            .and_then(|store| store.get(variant_id))
            .map(|variant| variant.positions.get(element).z_index)
        else {
            tracing::debug!("Ignoring {element} layer change: {variant_id} not in store");
            return 0;
        };
        let z_index = current.saturating_add(delta);
        self.update_element(variant_id, element, &PlacementPatch::z_index(z_index))
    }

    /// Merge `patch` into every variant's design, whatever the sync toggle.
    pub fn update_design(&mut self, patch: &DesignPatch) {
        if let Some(store) = self.store.as_mut() {
            store.update_design(patch);
        }
    }

    /// Merge `patch` into the shared copy text.
    pub fn update_generated_text(&mut self, patch: &TextPatch) {
        if let Some(text) = self.text.as_mut() {
            text.apply(patch);
            tracing::debug!("Updated shared text");
        }
    }

    /// Select an element, replacing any prior selection. `None` clears.
    pub fn select(&mut self, variant_id: &VariantId, element: Option<ElementKind>) {
        self.selection.select(variant_id, element);
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Option<&SelectionKey> {
        self.selection.current()
    }

    /// Whether edits fan out to every variant.
    #[must_use]
    pub fn sync_edits(&self) -> bool {
        self.sync_edits
    }

    /// Turn sync edits on or off.
    pub fn set_sync_edits(&mut self, enabled: bool) {
        self.sync_edits = enabled;
        tracing::debug!("Sync edits {}", if enabled { "on" } else { "off" });
    }

    /// Replace or remove the logo.
    pub fn set_logo(&mut self, logo: Option<String>) {
        self.logo = logo;
    }

    /// Current logo reference.
    #[must_use]
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    /// Replace or remove the background image.
    pub fn set_generated_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    /// Current background image reference.
    #[must_use]
    pub fn generated_image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Shared copy text, once generated.
    #[must_use]
    pub fn generated_text(&self) -> Option<&GeneratedText> {
        self.text.as_ref()
    }

    /// The variant store, once generated.
    #[must_use]
    pub fn store(&self) -> Option<&PosterStore> {
        self.store.as_ref()
    }

    /// Platform/size selection.
    #[must_use]
    pub fn platforms(&self) -> &PlatformSelection {
        &self.platforms
    }

    /// Flip one platform/size toggle.
    ///
    /// Takes effect on rendering immediately and on seeding at the next
    /// generation.
    pub fn toggle_platform(&mut self, platform: &str, size: &str) {
        self.platforms.toggle(platform, size);
    }

    /// Set one platform/size toggle.
    pub fn set_platform(&mut self, platform: &str, size: &str, selected: bool) {
        self.platforms.set(platform, size, selected);
    }

    /// Apply a serialized edit command.
    pub fn apply(&mut self, command: &EditCommand) {
        match command {
            EditCommand::UpdateElement {
                variant_id,
                element,
                patch,
            } => {
                self.update_element(variant_id, *element, patch);
            }
            EditCommand::UpdateDesign { patch } => self.update_design(patch),
            EditCommand::UpdateText { patch } => self.update_generated_text(patch),
            EditCommand::Align {
                variant_id,
                element,
                alignment,
            } => {
                self.align(variant_id, *element, *alignment);
            }
            EditCommand::BringForward {
                variant_id,
                element,
            } => {
                self.bring_forward(variant_id, *element);
            }
            EditCommand::SendBackward {
                variant_id,
                element,
            } => {
                self.send_backward(variant_id, *element);
            }
            EditCommand::SetSyncEdits { enabled } => self.set_sync_edits(*enabled),
            EditCommand::Select {
                variant_id,
                element,
            } => self.select(variant_id, Some(*element)),
            EditCommand::Deselect => self.deselect(),
            EditCommand::SetGeneratedImage { image } => self.set_generated_image(image.clone()),
            EditCommand::SetLogo { logo } => self.set_logo(logo.clone()),
        }
    }

    // ----- pointer interaction ----------------------------------------

    /// Feed a pointer event from the poster rendered for `variant_id`.
    ///
    /// `bounds` is that poster's current on-screen box. Pressing on an
    /// element starts a drag, pressing on a resize handle starts a resize,
    /// and both select the element. Pressing on the background clears the
    /// selection. Moves are routed through [`Self::update_element`].
    pub fn handle_pointer(
        &mut self,
        variant_id: &VariantId,
        event: &PointerEvent,
        bounds: ScreenRect,
    ) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        let Some(variant) = store.get(variant_id) else {
            tracing::debug!("Pointer event for unknown variant {variant_id}");
            return;
        };

        match event.phase {
            PointerPhase::Down => match event.target {
                Some(PointerTarget::Element(element)) => {
                    if let Some(controller) = self.controller_mut(variant_id) {
                        controller.begin_drag(element);
                        self.selection.select(variant_id, Some(element));
                    }
                }
                Some(PointerTarget::ResizeHandle(element)) => {
                    let start = variant.positions.get(element).resize_value(element);
                    if let Some(controller) = self.controller_mut(variant_id) {
                        controller.begin_resize(element, event.x, event.y, start);
                        self.selection.select(variant_id, Some(element));
                    }
                }
                Some(PointerTarget::Background) => self.selection.deselect(),
                None => {}
            },
            PointerPhase::Move => {
                let update = self
                    .controllers
                    .get(variant_id)
                    .and_then(|c| c.pointer_move(event.x, event.y, bounds));
                if let Some(update) = update {
                    self.update_element(variant_id, update.element, &update.patch);
                }
            }
            PointerPhase::Up => {
                if let Some(controller) = self.controllers.get_mut(variant_id) {
                    controller.pointer_up();
                }
            }
        }
    }

    /// Gesture state of one poster.
    #[must_use]
    pub fn interaction_state(&self, variant_id: &VariantId) -> InteractionState {
        self.controllers
            .get(variant_id)
            .map_or(InteractionState::Idle, InteractionController::state)
    }

    #[allow(clippy::cast_precision_loss)]
    fn controller_mut(&mut self, variant_id: &VariantId) -> Option<&mut InteractionController> {
        let (_, size) = variant_id.resolve()?;
        let (width, height) = (size.width as f32, size.height as f32);
        Some(
            self.controllers
                .entry(variant_id.clone())
                .or_insert_with(|| InteractionController::new(width, height)),
        )
    }

    // ----- rendering and export ---------------------------------------

    /// Render tree for one variant, or `None` if it cannot be rendered.
    #[must_use]
    pub fn render_document(&self, variant_id: &VariantId) -> Option<PosterDocument> {
        self.document_with(variant_id, &self.selection)
    }

    /// Render trees for every selected catalog size present in the store,
    /// in selection order.
    #[must_use]
    pub fn rendered_posters(&self) -> Vec<PosterDocument> {
        self.platforms
            .selected_posters()
            .iter()
            .filter_map(|poster| self.render_document(&poster.variant_id))
            .collect()
    }

    fn document_with(
        &self,
        variant_id: &VariantId,
        selection: &SelectionTracker,
    ) -> Option<PosterDocument> {
        let variant = self.store.as_ref()?.get(variant_id)?;
        let text = self.text.as_ref()?;
        let (platform, size) = variant_id.resolve()?;
        Some(PosterDocument::build(
            variant_id,
            platform.name,
            size,
            variant,
            RenderContext {
                text,
                logo: self.logo.as_deref(),
                image: self.image.as_deref(),
                selection,
            },
        ))
    }

    /// Export one variant.
    ///
    /// The capture carries no selection outline and is taken at twice the
    /// native size. The in-progress marker is cleared however the export
    /// ends.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::VariantNotFound`] if the variant cannot be
    /// rendered, [`EditorError::ExportInProgress`] if another export holds
    /// the marker, or [`EditorError::Export`] if the exporter fails.
    pub fn export(
        &mut self,
        variant_id: &VariantId,
        format: ExportFormat,
        exporter: &dyn PosterExporter,
    ) -> EditorResult<ExportArtifact> {
        let document = self
            .document_with(variant_id, &SelectionTracker::default())
            .ok_or_else(|| EditorError::VariantNotFound(variant_id.to_string()))?;

        let export_id = format!("{variant_id}-{format}");
        let _guard = ExportGuard::acquire(&mut self.exporting, export_id.clone())
            .map_err(EditorError::ExportInProgress)?;

        let request = ExportRequest::for_document(&document, format);
        tracing::info!(
            "Exporting {export_id} at {}x{}",
            request.pixel_width,
            request.pixel_height
        );
        let bytes = exporter.export(&document, &request).map_err(|err| {
            tracing::error!("Export {export_id} failed: {err}");
            EditorError::Export(err)
        })?;

        Ok(ExportArtifact {
            file_name: format!("{variant_id}.{}", format.extension()),
            format,
            bytes,
        })
    }

    /// Identifier of the export in progress.
    #[must_use]
    pub fn exporting(&self) -> Option<&str> {
        self.exporting.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{DesignConcept, LayoutStyle};
    use crate::element::TextAlign;

    fn result(layout: LayoutStyle) -> GenerationResult {
        GenerationResult {
            text: GeneratedText {
                heading: "Summer Sale".to_string(),
                description: "Everything half price".to_string(),
                cta: "Shop now".to_string(),
            },
            design: DesignConcept {
                background_color: "#222222".to_string(),
                text_color: "#ffffff".to_string(),
                heading_font: "Montserrat".to_string(),
                body_font: "Lato".to_string(),
                layout_style: layout,
                image_prompt: "beach".to_string(),
            },
            image: "data:image/png;base64,AAAA".to_string(),
        }
    }

    fn ready_editor() -> EditorState {
        let mut editor = EditorState::new();
        let ticket = editor.begin_generation("sale", None).expect("begin");
        editor
            .complete_generation(ticket, Ok(result(LayoutStyle::Centered)))
            .expect("complete");
        editor
    }

    #[test]
    fn test_begin_clears_previous_cycle() {
        let mut editor = ready_editor();
        let ig = VariantId::new("instagram", "Post");
        editor.select(&ig, Some(ElementKind::Heading));

        let _ticket = editor.begin_generation("again", None).expect("begin");
        assert!(editor.is_loading());
        assert!(editor.store().is_none());
        assert!(editor.generated_text().is_none());
        assert!(editor.selection().is_none());
    }

    #[test]
    fn test_second_begin_is_rejected_while_generating() {
        let mut editor = EditorState::new();
        let _ticket = editor.begin_generation("one", None).expect("begin");
        assert!(matches!(
            editor.begin_generation("two", None),
            Err(EditorError::GenerationInProgress)
        ));
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut editor = EditorState::new();
        let ticket = editor.begin_generation("one", None).expect("begin");
        editor.reset();
        editor
            .complete_generation(ticket, Ok(result(LayoutStyle::Centered)))
            .expect("ignored");
        assert!(editor.store().is_none());
        assert_eq!(editor.phase(), GenerationPhase::Idle);
    }

    #[test]
    fn test_failure_records_message() {
        let mut editor = EditorState::new();
        let ticket = editor.begin_generation("one", None).expect("begin");
        let err = editor
            .complete_generation(ticket, Err(GenerationError::new("boom")))
            .expect_err("failure");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(editor.error(), Some("boom"));
        assert_eq!(editor.phase(), GenerationPhase::Failed);
        assert!(!editor.is_loading());
        assert!(editor.store().is_none());
    }

    #[test]
    fn test_edits_without_store_are_noops() {
        let mut editor = EditorState::new();
        let changed = editor.update_element(
            &VariantId::new("instagram", "Post"),
            ElementKind::Cta,
            &PlacementPatch::position(1.0, 1.0),
        );
        assert_eq!(changed, 0);
        editor.update_generated_text(&TextPatch {
            heading: Some("x".to_string()),
            ..TextPatch::default()
        });
        assert!(editor.generated_text().is_none());
    }

    #[test]
    fn test_text_edits_ignore_sync_toggle() {
        let mut editor = ready_editor();
        editor.set_sync_edits(false);
        editor.update_generated_text(&TextPatch {
            cta: Some("Book now".to_string()),
            ..TextPatch::default()
        });
        for document in editor.rendered_posters() {
            let node = document.node(ElementKind::Cta).expect("cta");
            assert_eq!(
                node.content,
                crate::schema::NodeContent::Text {
                    text: "Book now".to_string()
                }
            );
        }
    }

    #[test]
    fn test_background_press_deselects() {
        let mut editor = ready_editor();
        let ig = VariantId::new("instagram", "Post");
        let bounds = ScreenRect::new(0.0, 0.0, 350.0, 350.0);
        editor.handle_pointer(
            &ig,
            &PointerEvent::down(PointerTarget::Element(ElementKind::Logo), 10.0, 10.0),
            bounds,
        );
        assert!(editor.selection().is_some());
        editor.handle_pointer(&ig, &PointerEvent::up(10.0, 10.0), bounds);
        editor.handle_pointer(
            &ig,
            &PointerEvent::down(PointerTarget::Background, 200.0, 200.0),
            bounds,
        );
        assert!(editor.selection().is_none());
        assert_eq!(editor.interaction_state(&ig), InteractionState::Idle);
    }

    #[test]
    fn test_apply_routes_commands() {
        let mut editor = ready_editor();
        let fb = VariantId::new("facebook", "Post");
        editor.apply(&EditCommand::SetSyncEdits { enabled: false });
        editor.apply(&EditCommand::UpdateElement {
            variant_id: fb.clone(),
            element: ElementKind::Heading,
            patch: PlacementPatch {
                x: Some(42.0),
                ..PlacementPatch::default()
            },
        });
        editor.apply(&EditCommand::Select {
            variant_id: fb.clone(),
            element: ElementKind::Heading,
        });

        let store = editor.store().expect("store");
        assert!((store.get(&fb).expect("fb").positions.heading.x - 42.0).abs() < f32::EPSILON);
        let ig = VariantId::new("instagram", "Post");
        assert!((store.get(&ig).expect("ig").positions.heading.x - 50.0).abs() < f32::EPSILON);
        assert!(!editor.sync_edits());
        assert_eq!(
            editor.selection().map(|s| s.element),
            Some(ElementKind::Heading)
        );
    }

    #[test]
    fn test_align_right_under_sync_moves_every_variant() {
        let mut editor = ready_editor();
        let ig = VariantId::new("instagram", "Post");
        let changed = editor.align(&ig, ElementKind::Heading, Alignment::Right);
        assert_eq!(changed, 2);

        for (_, variant) in editor.store().expect("store").iter() {
            let heading = &variant.positions.heading;
            assert!((heading.x - 95.0).abs() < f32::EPSILON);
            assert!((heading.y - 45.0).abs() < f32::EPSILON);
            assert_eq!(heading.text_align, TextAlign::Right);
        }
    }

    #[test]
    fn test_vertical_align_keeps_horizontal_fields() {
        let mut editor = ready_editor();
        editor.set_sync_edits(false);
        let fb = VariantId::new("facebook", "Post");
        editor.apply(&EditCommand::Align {
            variant_id: fb.clone(),
            element: ElementKind::Cta,
            alignment: Alignment::Bottom,
        });

        let store = editor.store().expect("store");
        let cta = &store.get(&fb).expect("fb").positions.cta;
        assert!((cta.y - 95.0).abs() < f32::EPSILON);
        assert!((cta.x - 50.0).abs() < f32::EPSILON);
        assert_eq!(cta.text_align, TextAlign::Center);
        let ig = VariantId::new("instagram", "Post");
        assert!((store.get(&ig).expect("ig").positions.cta.y - 65.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bring_forward_unsynced_changes_only_that_variant() {
        let mut editor = ready_editor();
        let ig = VariantId::new("instagram", "Post");
        let fb = VariantId::new("facebook", "Post");
        editor.set_sync_edits(false);
        editor.update_element(&fb, ElementKind::Logo, &PlacementPatch::z_index(4));
        let ig_before = editor
            .store()
            .and_then(|store| store.get(&ig))
            .map(|variant| variant.positions.logo.z_index)
            .expect("ig");

        editor.apply(&EditCommand::BringForward {
            variant_id: fb.clone(),
            element: ElementKind::Logo,
        });

        let store = editor.store().expect("store");
        assert_eq!(store.get(&fb).expect("fb").positions.logo.z_index, 5);
        assert_eq!(store.get(&ig).expect("ig").positions.logo.z_index, ig_before);
    }

    #[test]
    fn test_send_backward_under_sync_copies_source_layer() {
        let mut editor = ready_editor();
        let ig = VariantId::new("instagram", "Post");
        let fb = VariantId::new("facebook", "Post");
        editor.set_sync_edits(false);
        editor.update_element(&ig, ElementKind::Cta, &PlacementPatch::z_index(7));
        editor.set_sync_edits(true);

        assert_eq!(editor.send_backward(&ig, ElementKind::Cta), 2);

        let store = editor.store().expect("store");
        assert_eq!(store.get(&ig).expect("ig").positions.cta.z_index, 6);
        assert_eq!(store.get(&fb).expect("fb").positions.cta.z_index, 6);
    }

    #[test]
    fn test_layer_change_on_missing_variant_is_noop() {
        let mut editor = ready_editor();
        let missing = VariantId::new("linkedin", "Post");
        assert_eq!(editor.bring_forward(&missing, ElementKind::Heading), 0);
        assert_eq!(EditorState::new().send_backward(&missing, ElementKind::Heading), 0);
    }

    #[test]
    fn test_deselected_platform_is_not_rendered() {
        let mut editor = ready_editor();
        assert_eq!(editor.rendered_posters().len(), 2);
        editor.toggle_platform("facebook", "Post");
        let documents = editor.rendered_posters();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].variant_id, VariantId::new("instagram", "Post"));
    }
}
