//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Spatial partitioning and biome classification tunables.
    pub worldgen: WorldGenConfig,
    /// Per-kind spawn density multipliers.
    pub spawn: SpawnConfig,
    /// Ground colour (biome border) settings.
    pub ground: GroundConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Relative weight of each generation axis in biome distance checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisWeights {
    /// Weight of the primary axis.
    pub primary: f64,
    /// Weight of the secondary axis.
    pub secondary: f64,
    /// Weight of the tertiary axis (only used when a biome targets it).
    pub tertiary: f64,
}

/// World generation tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Side length of a generation chunk in world units.
    pub chunk_size: f64,
    /// Side length of a biome grid cell in world units.
    pub biome_cell_size: f64,
    /// Noise frequency applied to biome cell coordinates. Lower = larger biomes.
    pub biome_scale: f64,
    /// Offset into the noise field for the secondary axis.
    pub secondary_axis_offset: f64,
    /// Offset into the noise field for the tertiary axis.
    pub tertiary_axis_offset: f64,
    /// Maximum axis distance for an `ABOVE` biome to match its target.
    pub above_tolerance: f64,
    /// Axis weights for distance checks.
    pub axis_weights: AxisWeights,
    /// Distance between spawn points inside a chunk.
    pub spawn_step: f64,
    /// Fraction of `spawn_step` a spawn point may be jittered by, in `[0.0, 1.0]`.
    pub spawn_jitter: f64,
    /// Side length of a structure tile in world units.
    pub tile_size: f64,
    /// World units per texture pixel.
    pub pixel_scale: f64,
    /// Hitbox height fraction for assets that do not specify one.
    pub default_hitbox_height_scale: f64,
    /// Extra ring of chunks generated around the viewport.
    pub visible_buffer_chunks: u32,
}

/// Density multipliers applied on top of each spawn table entry.
///
/// These are policy knobs: entities are rarer than props, structures the rarest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Multiplier for props.
    pub prop_multiplier: f64,
    /// Multiplier for entities.
    pub entity_multiplier: f64,
    /// Multiplier for items.
    pub item_multiplier: f64,
    /// Multiplier for structures.
    pub structure_multiplier: f64,
}

/// Ground colour settings used when shading biome borders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroundConfig {
    /// Width of the darkened strip between two biomes, in world units.
    pub border_thickness: f64,
    /// Colour noise intensity inside the border strip.
    pub border_noise: f64,
    /// Brightness factor applied to the mixed border colour.
    pub border_darkening: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to `log_dir`.
    pub file_logging: bool,
    /// Directory for JSON log files.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for AxisWeights {
    fn default() -> Self {
        Self {
            primary: 1.0,
            secondary: 0.7,
            tertiary: 0.3,
        }
    }
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500.0,
            biome_cell_size: 3000.0,
            biome_scale: 0.12,
            secondary_axis_offset: 500.0,
            tertiary_axis_offset: 1000.0,
            above_tolerance: 0.15,
            axis_weights: AxisWeights::default(),
            spawn_step: 100.0,
            spawn_jitter: 0.8,
            tile_size: 50.0,
            pixel_scale: 10.0,
            default_hitbox_height_scale: 0.3,
            visible_buffer_chunks: 1,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            prop_multiplier: 1.0,
            entity_multiplier: 0.1,
            item_multiplier: 0.6,
            structure_multiplier: 0.1,
        }
    }
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            border_thickness: 50.0,
            border_noise: 0.04,
            border_darkening: 0.8,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: false,
            log_dir: None,
        }
    }
}

/// Platform config directory for Horizons (e.g. `~/.config/horizons`).
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("horizons")
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
