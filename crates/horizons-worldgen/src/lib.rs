//! Deterministic chunk-based 2D world generation: seeded noise, biome
//! classification, structure stamping, and density-driven element placement.

mod chunk;
mod collision;
mod color;
mod element;
mod error;
mod generator;
mod ground;
mod items;
mod spawn;
mod structure;
mod world;
mod world_def;

pub mod biome;
pub mod seed;

pub use biome::{
    AxisValues, BiomeCategory, BiomeClassifier, BiomeDef, BiomeId, BiomePoint, BiomeRegistry,
    BiomeRegistryError, BiomeVisuals, ClassifierParams, EntitySpawn, EntityStats, GenerationAxes,
    ItemSpawn, PropSpawn, StructureSpawn,
};
pub use chunk::{Chunk, ChunkCache, ChunkCoord};
pub use collision::{AabbProbe, Collider, CollisionProbe, SpriteFootprint, sprite_hitbox, tile_hitbox};
pub use color::{ColorParseError, Rgb};
pub use element::{Entity, Item, Placement, Prop, Tile, TileLayer, WorldElement};
pub use error::WorldGenError;
pub use ground::ground_color;
pub use items::{ItemData, StatLevel, WeaponStats};
pub use spawn::{CandidateKind, SpawnCandidate, candidates, ordered_candidates};
pub use structure::{CellMarker, LayoutDef, StructureLayout, StructureLayouts, StructureStamper};
pub use world::World;
pub use world_def::{WorldBundle, WorldDef, WorldSettings};
