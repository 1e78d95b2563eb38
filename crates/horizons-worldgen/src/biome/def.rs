//! Biome definition: describes the properties of a single biome type.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::items::ItemData;

/// How a biome is selected for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiomeCategory {
    /// Rare biome checked first: gated by a rarity roll and an optional axis match.
    #[serde(rename = "ABOVE")]
    Above,
    /// Fallback biome chosen by nearest generation-axis target.
    #[serde(rename = "REGION")]
    Region,
}

/// Target position of a biome in generation-axis space, each in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationAxes {
    pub primary: f64,
    pub secondary: f64,
    /// Only biomes that set it are compared on the tertiary axis.
    #[serde(default)]
    pub tertiary: Option<f64>,
}

/// Ground appearance of a biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeVisuals {
    #[serde(alias = "groundColor")]
    pub ground_color: Rgb,
    /// Per-pixel brightness variation, `0.0` for a flat colour.
    #[serde(default, alias = "groundNoiseIntensity")]
    pub ground_noise_intensity: f64,
}

/// A prop (static decoration) that can spawn in a biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropSpawn {
    pub texture: String,
    pub density: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

/// Gameplay numbers for a spawned entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityStats {
    pub speed: f64,
    pub health: f64,
    pub traits: Vec<String>,
}

impl Default for EntityStats {
    fn default() -> Self {
        Self {
            speed: 1.0,
            health: 100.0,
            traits: Vec::new(),
        }
    }
}

/// A creature that can spawn in a biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySpawn {
    pub texture: String,
    pub density: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
    #[serde(default)]
    pub stats: EntityStats,
}

/// A pickup that can spawn in a biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub texture: String,
    pub density: f64,
    #[serde(default, alias = "displayName")]
    pub display_name: String,
    #[serde(default, alias = "displayDescription")]
    pub display_description: String,
    #[serde(default, alias = "itemData")]
    pub item_data: ItemData,
}

/// A structure template that can be stamped in a biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureSpawn {
    /// Key into the structure layout registry.
    pub layout: String,
    pub density: f64,
    #[serde(alias = "wallTexture")]
    pub wall_texture: String,
    #[serde(alias = "floorTexture")]
    pub floor_texture: String,
    #[serde(default, alias = "wallTint")]
    pub wall_tint: Option<Rgb>,
    #[serde(default, alias = "floorTint")]
    pub floor_tint: Option<Rgb>,
}

/// Full descriptor for a biome type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeDef {
    #[serde(alias = "biomeName")]
    pub name: String,
    #[serde(alias = "biomeType")]
    pub category: BiomeCategory,
    /// Required for `REGION` biomes, optional for `ABOVE` biomes.
    #[serde(default, alias = "generationAxes")]
    pub generation_axes: Option<GenerationAxes>,
    /// An `ABOVE` biome is skipped when the cell's rarity roll is below this.
    #[serde(default)]
    pub rarity: f64,
    pub visuals: BiomeVisuals,
    #[serde(default)]
    pub props: Vec<PropSpawn>,
    #[serde(default)]
    pub entities: Vec<EntitySpawn>,
    #[serde(default)]
    pub items: Vec<ItemSpawn>,
    #[serde(default)]
    pub structures: Vec<StructureSpawn>,
}

fn unit_scale() -> f64 {
    1.0
}
