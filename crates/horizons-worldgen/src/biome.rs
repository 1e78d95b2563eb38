//! Biome system: definitions, registry, and jittered-grid classification.
//!
//! The world is covered by a lattice of biome cells. Each cell owns one biome
//! point at a seeded position inside it, and every world location belongs to
//! the nearest biome point.

mod classifier;
mod def;
mod registry;

pub use classifier::{AxisValues, BiomeClassifier, BiomePoint, ClassifierParams};
pub use def::{
    BiomeCategory, BiomeDef, BiomeVisuals, EntitySpawn, EntityStats, GenerationAxes, ItemSpawn,
    PropSpawn, StructureSpawn,
};
pub use registry::{BiomeId, BiomeRegistry, BiomeRegistryError};
