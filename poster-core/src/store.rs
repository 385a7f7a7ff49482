//! Poster variant storage and the edit propagation policy.
//!
//! The store maps each [`VariantId`] to that variant's design concept and
//! its four element placements. It is rebuilt wholesale at the end of every
//! generation cycle and is otherwise only mutated through
//! [`PosterStore::update_element`] and [`PosterStore::update_design`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::design::{DesignConcept, DesignPatch};
use crate::element::{ElementKind, ElementPlacements, PlacementPatch};
use crate::layout::{initial_placements, REFERENCE_CANVAS_WIDTH};
use crate::platform::VariantId;

/// Complete editable state of one platform/size poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterVariant {
    /// This variant's copy of the design concept.
    pub design: DesignConcept,
    /// This variant's element placements.
    pub positions: ElementPlacements,
}

/// Whether an element edit fans out to every variant or stays local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditScope {
    /// Apply to every variant in the store.
    All,
    /// Apply only to the named variant.
    Single,
}

impl EditScope {
    /// Scope implied by the sync-edits toggle.
    #[must_use]
    pub const fn from_sync(sync_edits: bool) -> Self {
        if sync_edits {
            Self::All
        } else {
            Self::Single
        }
    }
}

/// All poster variants of one generation cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosterStore {
    variants: HashMap<VariantId, PosterVariant>,
}

impl PosterStore {
    /// Seed one variant per identifier from a shared design concept.
    ///
    /// Each variant receives its own design copy and freshly built
    /// placements for the design's layout style.
    #[must_use]
    pub fn seed<I>(variant_ids: I, design: &DesignConcept) -> Self
    where
        I: IntoIterator<Item = VariantId>,
    {
        let variants = variant_ids
            .into_iter()
            .map(|id| {
                let variant = PosterVariant {
                    design: design.clone(),
                    positions: initial_placements(design.layout_style, REFERENCE_CANVAS_WIDTH),
                };
                (id, variant)
            })
            .collect();
        Self { variants }
    }

    /// Get a variant.
    #[must_use]
    pub fn get(&self, id: &VariantId) -> Option<&PosterVariant> {
        self.variants.get(id)
    }

    /// Whether the store holds a variant.
    #[must_use]
    pub fn contains(&self, id: &VariantId) -> bool {
        self.variants.contains_key(id)
    }

    /// Iterate all variants in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&VariantId, &PosterVariant)> {
        self.variants.iter()
    }

    /// Variant identifiers, sorted.
    #[must_use]
    pub fn variant_ids(&self) -> Vec<VariantId> {
        let mut ids: Vec<_> = self.variants.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the store holds no variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Merge a placement patch into one element.
    ///
    /// With [`EditScope::All`] the patch lands on `kind` in every variant,
    /// whatever `id` names. With [`EditScope::Single`] only `id` changes;
    /// an unknown `id` is a no-op. Returns the number of variants touched.
    pub fn update_element(
        &mut self,
        id: &VariantId,
        kind: ElementKind,
        patch: &PlacementPatch,
        scope: EditScope,
    ) -> usize {
        match scope {
            EditScope::All => {
                for variant in self.variants.values_mut() {
                    variant.positions.get_mut(kind).apply(patch);
                }
                tracing::debug!(
                    "Applied {kind} update to all {} variants",
                    self.variants.len()
                );
                self.variants.len()
            }
            EditScope::Single => {
                if let Some(variant) = self.variants.get_mut(id) {
                    variant.positions.get_mut(kind).apply(patch);
                    tracing::debug!("Applied {kind} update to {id}");
                    1
                } else {
                    tracing::debug!("Ignoring {kind} update for missing variant {id}");
                    0
                }
            }
        }
    }

    /// Merge a design patch into every variant.
    pub fn update_design(&mut self, patch: &DesignPatch) {
        for variant in self.variants.values_mut() {
            variant.design.apply(patch);
        }
        tracing::debug!("Applied design update to {} variants", self.variants.len());
    }
}
