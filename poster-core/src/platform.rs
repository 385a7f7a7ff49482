//! Platform catalog, size selection, and variant identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One canvas size offered by a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformSize {
    /// Size name, e.g. `"Post"`.
    pub name: &'static str,
    /// Native width in pixels.
    pub width: u32,
    /// Native height in pixels.
    pub height: u32,
}

/// A social platform and the sizes it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Platform {
    /// Lookup key, e.g. `"instagram"`.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Supported sizes.
    pub sizes: &'static [PlatformSize],
}

impl Platform {
    /// Look up a size by name.
    #[must_use]
    pub fn size(&self, name: &str) -> Option<&'static PlatformSize> {
        self.sizes.iter().find(|s| s.name == name)
    }
}

const fn sized(name: &'static str, width: u32, height: u32) -> PlatformSize {
    PlatformSize {
        name,
        width,
        height,
    }
}

/// Every platform the designer can target.
pub const PLATFORMS: [Platform; 4] = [
    Platform {
        key: "instagram",
        name: "Instagram",
        sizes: &[
            sized("Post", 1080, 1080),
            sized("Story", 1080, 1920),
            sized("Reel", 1080, 1920),
        ],
    },
    Platform {
        key: "facebook",
        name: "Facebook",
        sizes: &[
            sized("Post", 1200, 630),
            sized("Story", 1080, 1920),
        ],
    },
    Platform {
        key: "linkedin",
        name: "LinkedIn",
        sizes: &[sized("Post", 1200, 627)],
    },
    Platform {
        key: "pinterest",
        name: "Pinterest",
        sizes: &[sized("Pin", 1000, 1500)],
    },
];

/// Look up a platform by key.
#[must_use]
pub fn platform(key: &str) -> Option<&'static Platform> {
    PLATFORMS.iter().find(|p| p.key == key)
}

/// Identifier of one poster variant: `"{platform}-{size}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    /// Build the identifier for a platform/size pair.
    #[must_use]
    pub fn new(platform_key: &str, size_name: &str) -> Self {
        Self(format!("{platform_key}-{size_name}"))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(platform_key, size_name)`.
    ///
    /// Platform keys never contain `-`, so the first dash separates them.
    #[must_use]
    pub fn split(&self) -> Option<(&str, &str)> {
        self.0.split_once('-')
    }

    /// Resolve the catalog entry for this variant, if it is a known one.
    #[must_use]
    pub fn resolve(&self) -> Option<(&'static Platform, &'static PlatformSize)> {
        let (platform_key, size_name) = self.split()?;
        let platform = platform(platform_key)?;
        let size = platform.size(size_name)?;
        Some((platform, size))
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for VariantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A selected platform/size pair that exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPoster {
    /// Variant identifier.
    pub variant_id: VariantId,
    /// Platform display name.
    pub platform_name: &'static str,
    /// Catalog size.
    pub size: PlatformSize,
}

/// One `(platform, size) -> selected` toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeToggle {
    /// Platform key.
    pub platform: String,
    /// Size name.
    pub size: String,
    /// Whether the size is selected.
    pub selected: bool,
}

/// Ordered platform/size selection.
///
/// Order is insertion order and decides render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformSelection {
    toggles: Vec<SizeToggle>,
}

impl PlatformSelection {
    /// A selection with nothing in it.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            toggles: Vec::new(),
        }
    }

    /// Every catalog size, unselected.
    #[must_use]
    pub fn catalog() -> Self {
        let toggles = PLATFORMS
            .iter()
            .flat_map(|p| {
                p.sizes.iter().map(|s| SizeToggle {
                    platform: p.key.to_string(),
                    size: s.name.to_string(),
                    selected: false,
                })
            })
            .collect();
        Self { toggles }
    }

    /// Set a toggle, appending it when the pair is new.
    pub fn set(&mut self, platform: &str, size: &str, selected: bool) {
        if let Some(toggle) = self
            .toggles
            .iter_mut()
            .find(|t| t.platform == platform && t.size == size)
        {
            toggle.selected = selected;
        } else {
            self.toggles.push(SizeToggle {
                platform: platform.to_string(),
                size: size.to_string(),
                selected,
            });
        }
    }

    /// Flip a toggle. Unknown pairs become selected.
    pub fn toggle(&mut self, platform: &str, size: &str) {
        let selected = !self.is_selected(platform, size);
        self.set(platform, size, selected);
    }

    /// Whether a pair is selected.
    #[must_use]
    pub fn is_selected(&self, platform: &str, size: &str) -> bool {
        self.toggles
            .iter()
            .any(|t| t.platform == platform && t.size == size && t.selected)
    }

    /// Variant identifiers of every selected pair, catalog or not.
    #[must_use]
    pub fn selected_variants(&self) -> Vec<VariantId> {
        self.toggles
            .iter()
            .filter(|t| t.selected)
            .map(|t| VariantId::new(&t.platform, &t.size))
            .collect()
    }

    /// Selected pairs that exist in the catalog, in render order.
    #[must_use]
    pub fn selected_posters(&self) -> Vec<SelectedPoster> {
        self.toggles
            .iter()
            .filter(|t| t.selected)
            .filter_map(|t| {
                let platform = platform(&t.platform)?;
                let size = platform.size(&t.size)?;
                Some(SelectedPoster {
                    variant_id: VariantId::new(&t.platform, &t.size),
                    platform_name: platform.name,
                    size: *size,
                })
            })
            .collect()
    }
}

impl Default for PlatformSelection {
    /// The full catalog with Instagram Post and Facebook Post selected.
    fn default() -> Self {
        let mut selection = Self::catalog();
        selection.set("instagram", "Post", true);
        selection.set("facebook", "Post", true);
        selection
    }
}
