//! The world: an explicit owned context for seed, definitions and caches.

use glam::DVec2;
use horizons_assets::{AssetRegistry, ElementKind};
use horizons_config::{Config, GroundConfig, SpawnConfig, WorldGenConfig};

use crate::biome::{BiomeClassifier, BiomeDef, BiomePoint, BiomeRegistry, ClassifierParams};
use crate::chunk::{Chunk, ChunkCache, ChunkCoord};
use crate::collision::{AabbProbe, CollisionProbe};
use crate::color::Rgb;
use crate::element::{Entity, Item, WorldElement};
use crate::error::WorldGenError;
use crate::generator::ChunkPass;
use crate::ground;
use crate::seed;
use crate::spawn::candidates;
use crate::structure::StructureLayouts;
use crate::world_def::{WorldBundle, WorldDef, WorldSettings};

/// A procedurally generated world.
///
/// Everything except materialized chunks, entities and items is a pure
/// function of the seed, the definitions and the configuration. Chunks are
/// generated at most once and cached for the lifetime of the world.
pub struct World {
    seed: i64,
    config: WorldGenConfig,
    spawn: SpawnConfig,
    ground: GroundConfig,
    settings: WorldSettings,
    classifier: BiomeClassifier,
    layouts: StructureLayouts,
    assets: AssetRegistry,
    probe: Box<dyn CollisionProbe>,
    chunks: ChunkCache,
    entities: Vec<Entity>,
    items: Vec<Item>,
}

impl World {
    /// Creates a world, validating the configuration and every definition.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: bad tuning, an invalid biome, a
    /// density outside `[0, 1]`, an unknown texture or an unknown layout.
    pub fn new(
        seed: i64,
        config: &Config,
        def: WorldDef,
        layouts: StructureLayouts,
        assets: AssetRegistry,
    ) -> Result<Self, WorldGenError> {
        validate_tuning(&config.worldgen, &config.spawn)?;
        for biome in &def.biomes {
            validate_biome(biome, &layouts, &assets)?;
        }
        if !def.settings.player_texture.is_empty() {
            assets.get(ElementKind::Entity, &def.settings.player_texture)?;
        }

        let registry = BiomeRegistry::from_defs(def.biomes)?;
        let classifier =
            BiomeClassifier::new(seed, ClassifierParams::from(&config.worldgen), registry);

        tracing::info!(
            seed,
            biomes = classifier.registry().len(),
            layouts = layouts.len(),
            assets = assets.len(),
            "world created"
        );

        Ok(Self {
            seed,
            config: config.worldgen.clone(),
            spawn: config.spawn.clone(),
            ground: config.ground.clone(),
            settings: def.settings,
            classifier,
            layouts,
            assets,
            probe: Box::new(AabbProbe),
            chunks: ChunkCache::new(),
            entities: Vec::new(),
            items: Vec::new(),
        })
    }

    /// Like [`World::new`] with a random seed in `[0, 100000)`.
    pub fn with_random_seed(
        config: &Config,
        def: WorldDef,
        layouts: StructureLayouts,
        assets: AssetRegistry,
    ) -> Result<Self, WorldGenError> {
        Self::new(seed::random_world_seed(), config, def, layouts, assets)
    }

    /// Builds a world from a deserialized bundle.
    pub fn from_bundle(seed: i64, config: &Config, bundle: WorldBundle) -> Result<Self, WorldGenError> {
        let (def, layouts, assets) = bundle.into_parts()?;
        Self::new(seed, config, def, layouts, assets)
    }

    /// Replaces the collision probe used for placement checks.
    pub fn with_probe(mut self, probe: impl CollisionProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    pub fn biomes(&self) -> &BiomeRegistry {
        self.classifier.registry()
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    pub fn chunks(&self) -> &ChunkCache {
        &self.chunks
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities are simulated elsewhere; positions written here are seen by
    /// later chunk passes.
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Removes and returns the item at `index` (e.g. when picked up).
    pub fn take_item(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn biome_point_for_cell(&self, gx: i64, gy: i64) -> BiomePoint {
        self.classifier.biome_point_for_cell(gx, gy)
    }

    pub fn biome_at_location(&self, position: DVec2) -> BiomePoint {
        self.classifier.biome_at_location(position)
    }

    pub fn visible_biome_points(&self, center: DVec2, width: f64, height: f64) -> Vec<BiomePoint> {
        self.classifier.visible_biome_points(center, width, height)
    }

    /// Ground colour at a world position.
    pub fn ground_color_at(&self, position: DVec2, high_quality: bool) -> Rgb {
        let points = self.classifier.visible_biome_points(position, 0.0, 0.0);
        ground::ground_color(
            position,
            &points,
            self.classifier.registry(),
            &self.ground,
            high_quality,
        )
        .unwrap_or(Rgb::BLACK)
    }

    /// Generates the chunk at `coord` unless it already exists.
    ///
    /// Calling this again for the same coordinate returns the cached chunk
    /// without touching any state.
    ///
    /// # Errors
    ///
    /// Returns a configuration fault hit during population. The partial chunk
    /// and any entities or items it spawned are discarded.
    pub fn generate_chunk_data(&mut self, coord: ChunkCoord) -> Result<&Chunk, WorldGenError> {
        if self.chunks.contains(coord) {
            return Ok(&self.chunks[coord]);
        }

        let entity_mark = self.entities.len();
        let item_mark = self.items.len();

        let World {
            seed,
            config,
            spawn,
            classifier,
            layouts,
            assets,
            probe,
            chunks,
            entities,
            items,
            ..
        } = self;
        let pass = ChunkPass {
            seed: *seed,
            config,
            spawn,
            classifier,
            assets,
            layouts,
            probe: &**probe,
            chunk: chunks.insert_empty(coord, config.chunk_size),
            entities,
            items,
        };

        match pass.run() {
            Ok(stats) => {
                if let Some(chunk) = self.chunks.get_mut(coord) {
                    chunk.seal();
                }
                tracing::debug!(
                    x = coord.x,
                    y = coord.y,
                    points = stats.spawn_points,
                    props = stats.props,
                    entities = stats.entities,
                    items = stats.items,
                    structures = stats.structures,
                    tiles = stats.tiles,
                    "chunk generated"
                );
                Ok(&self.chunks[coord])
            }
            Err(err) => {
                self.chunks.remove(coord);
                self.entities.truncate(entity_mark);
                self.items.truncate(item_mark);
                tracing::error!(x = coord.x, y = coord.y, error = %err, "chunk generation failed");
                Err(err)
            }
        }
    }

    /// Generates every chunk overlapping the viewport plus a buffer ring.
    ///
    /// Returns the coordinates generated by this call, in row-major order.
    pub fn generate_visible_chunks(
        &mut self,
        center: DVec2,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Result<Vec<ChunkCoord>, WorldGenError> {
        let size = self.config.chunk_size;
        let half = DVec2::new(viewport_width, viewport_height) * 0.5;
        let buffer = i64::from(self.config.visible_buffer_chunks);
        let min = ChunkCoord::containing(center - half, size);
        let max = ChunkCoord::containing(center + half, size);

        let mut generated = Vec::new();
        for y in (min.y - buffer)..=(max.y + buffer) {
            for x in (min.x - buffer)..=(max.x + buffer) {
                let coord = ChunkCoord::new(x, y);
                if !self.chunks.contains(coord) {
                    self.generate_chunk_data(coord)?;
                    generated.push(coord);
                }
            }
        }
        if !generated.is_empty() {
            tracing::debug!(count = generated.len(), cached = self.chunks.len(), "visible chunks generated");
        }
        Ok(generated)
    }

    /// Everything a chunk spawned: props, tiles, then entities and items that
    /// originated there. Empty if the chunk has not been generated.
    pub fn elements_in(&self, coord: ChunkCoord) -> Vec<WorldElement<'_>> {
        let Some(chunk) = self.chunks.get(coord) else {
            return Vec::new();
        };
        chunk
            .elements()
            .chain(
                self.entities
                    .iter()
                    .filter(|e| e.origin == coord)
                    .map(WorldElement::Entity),
            )
            .chain(
                self.items
                    .iter()
                    .filter(|i| i.origin == coord)
                    .map(WorldElement::Item),
            )
            .collect()
    }
}

fn validate_tuning(config: &WorldGenConfig, spawn: &SpawnConfig) -> Result<(), WorldGenError> {
    let positive = [
        ("chunk_size", config.chunk_size),
        ("biome_cell_size", config.biome_cell_size),
        ("spawn_step", config.spawn_step),
        ("tile_size", config.tile_size),
        ("pixel_scale", config.pixel_scale),
    ];
    for (name, value) in positive {
        if !(value > 0.0 && value.is_finite()) {
            return Err(WorldGenError::InvalidTuning(format!("{name} must be positive, got {value}")));
        }
    }
    if (config.chunk_size / config.tile_size).fract() != 0.0 {
        return Err(WorldGenError::InvalidTuning(format!(
            "chunk_size {} is not a multiple of tile_size {}",
            config.chunk_size, config.tile_size
        )));
    }
    if !(0.0..=1.0).contains(&config.spawn_jitter) {
        return Err(WorldGenError::InvalidTuning(format!(
            "spawn_jitter {} outside [0, 1]",
            config.spawn_jitter
        )));
    }
    let per_axis = (config.chunk_size / config.spawn_step).ceil();
    if per_axis > seed::MAX_SPAWN_POINTS_PER_AXIS as f64 {
        return Err(WorldGenError::InvalidTuning(format!(
            "spawn_step {} gives {per_axis} spawn points per axis, at most {} allowed",
            config.spawn_step,
            seed::MAX_SPAWN_POINTS_PER_AXIS
        )));
    }
    let multipliers = [
        spawn.prop_multiplier,
        spawn.entity_multiplier,
        spawn.item_multiplier,
        spawn.structure_multiplier,
    ];
    if multipliers.iter().any(|m| m.is_nan() || *m < 0.0) {
        return Err(WorldGenError::InvalidTuning(
            "density multipliers must be non-negative".into(),
        ));
    }
    Ok(())
}

fn validate_biome(
    biome: &BiomeDef,
    layouts: &StructureLayouts,
    assets: &AssetRegistry,
) -> Result<(), WorldGenError> {
    if candidates(biome).count() as i64 > seed::CANDIDATE_SLOTS {
        return Err(WorldGenError::InvalidTuning(format!(
            "biome {} has more than {} spawn entries",
            biome.name,
            seed::CANDIDATE_SLOTS
        )));
    }
    for candidate in candidates(biome) {
        let density = candidate.density();
        if !(0.0..=1.0).contains(&density) {
            return Err(WorldGenError::InvalidDensity {
                biome: biome.name.clone(),
                kind: candidate.kind(),
                entry: candidate.label().to_string(),
                density,
            });
        }
        if candidate.is_structure() {
            layouts.get(candidate.label())?;
        } else {
            assets.get(candidate.kind().element_kind(), candidate.label())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
