//! Asset registry: maps `(ElementKind, texture id)` to [`AssetMeta`].
//!
//! Built once from an asset manifest before a world is created. Lookups are
//! O(1) and a missing texture is reported as an error so malformed world
//! definitions fail at load time instead of producing broken chunks.

use std::collections::BTreeMap;

use horizons_math::DVec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Category of a world element, matching the asset manifest sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "props")]
    Prop,
    #[serde(rename = "entities")]
    Entity,
    #[serde(rename = "items")]
    Item,
    #[serde(rename = "tiles")]
    Tile,
    #[serde(rename = "structures")]
    Structure,
}

impl ElementKind {
    /// Manifest section name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Prop => "props",
            ElementKind::Entity => "entities",
            ElementKind::Item => "items",
            ElementKind::Tile => "tiles",
            ElementKind::Structure => "structures",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Footprint and collision metadata for one texture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetMeta {
    /// Whether other elements may not overlap this one.
    #[serde(default, alias = "hasCollision")]
    pub collidable: bool,
    /// Texture width in pixels.
    #[serde(alias = "naturalWidth")]
    pub natural_width: f64,
    /// Texture height in pixels.
    #[serde(alias = "naturalHeight")]
    pub natural_height: f64,
    /// Fraction of the sprite height (from the bottom) covered by the hitbox.
    #[serde(default, alias = "hitboxHeightScale")]
    pub hitbox_height_scale: Option<f64>,
}

impl AssetMeta {
    /// Sprite size in world units for a given pixel scale and element scale.
    pub fn sprite_size(&self, pixel_scale: f64, scale: f64) -> DVec2 {
        DVec2::new(self.natural_width, self.natural_height) * pixel_scale * scale
    }
}

/// Serialized manifest layout: section → texture id → metadata.
pub type AssetManifest = BTreeMap<ElementKind, BTreeMap<String, AssetMeta>>;

/// Errors that can occur when registering or resolving assets.
#[derive(Debug, Error, PartialEq)]
pub enum AssetError {
    /// The same texture was registered twice in one section.
    #[error("duplicate {kind} asset: {texture}")]
    Duplicate { kind: ElementKind, texture: String },
    /// A texture was referenced but never registered.
    #[error("unknown {kind} asset: {texture}")]
    Unknown { kind: ElementKind, texture: String },
    /// Texture dimensions must be positive.
    #[error("{kind} asset {texture} has a non-positive size")]
    InvalidSize { kind: ElementKind, texture: String },
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Asset metadata keyed by element kind and texture id.
#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    assets: FxHashMap<(ElementKind, String), AssetMeta>,
}

impl AssetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a parsed manifest.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InvalidSize`] for textures with a zero or negative size.
    pub fn from_manifest(manifest: AssetManifest) -> Result<Self, AssetError> {
        let mut registry = Self::new();
        for (kind, section) in manifest {
            for (texture, meta) in section {
                registry.register(kind, texture, meta)?;
            }
        }
        tracing::debug!(count = registry.len(), "asset registry built");
        Ok(registry)
    }

    /// Registers metadata for a texture.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Duplicate`] if the texture already exists in this
    /// section, or [`AssetError::InvalidSize`] for non-positive dimensions.
    pub fn register(
        &mut self,
        kind: ElementKind,
        texture: impl Into<String>,
        meta: AssetMeta,
    ) -> Result<(), AssetError> {
        let texture = texture.into();
        if !(meta.natural_width > 0.0 && meta.natural_height > 0.0) {
            return Err(AssetError::InvalidSize { kind, texture });
        }
        let key = (kind, texture);
        if self.assets.contains_key(&key) {
            let (kind, texture) = key;
            return Err(AssetError::Duplicate { kind, texture });
        }
        self.assets.insert(key, meta);
        Ok(())
    }

    /// Looks up the metadata for a texture.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Unknown`] if the texture was never registered.
    pub fn get(&self, kind: ElementKind, texture: &str) -> Result<&AssetMeta, AssetError> {
        self.assets
            .get(&(kind, texture.to_string()))
            .ok_or_else(|| AssetError::Unknown {
                kind,
                texture: texture.to_string(),
            })
    }

    /// Returns true if the texture is registered under `kind`.
    pub fn contains(&self, kind: ElementKind, texture: &str) -> bool {
        self.assets.contains_key(&(kind, texture.to_string()))
    }

    /// Returns the number of registered textures across all sections.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
