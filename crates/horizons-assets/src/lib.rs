//! Asset metadata consumed by world generation.
//!
//! The generator never touches images; it only needs each texture's natural
//! size and collision flags to compute footprints and hitboxes.

mod registry;

pub use registry::{AssetError, AssetManifest, AssetMeta, AssetRegistry, ElementKind};
