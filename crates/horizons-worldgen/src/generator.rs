//! One chunk generation pass.
//!
//! Walks a jittered grid of spawn points over the chunk. At each point the
//! local biome's spawn tables are shuffled into a candidate list (structures
//! first), each candidate is gated by a density roll, and the first one that
//! fits without colliding is placed. At most one element spawns per point.

use glam::DVec2;
use horizons_assets::{AssetRegistry, ElementKind};
use horizons_config::{SpawnConfig, WorldGenConfig};
use horizons_math::clamp_or_center;

use crate::biome::BiomeClassifier;
use crate::chunk::Chunk;
use crate::collision::{Collider, CollisionProbe, SpriteFootprint};
use crate::element::{Entity, Item, Placement, Prop};
use crate::error::WorldGenError;
use crate::seed::{self, DENSITY_BASE, FLIP_BASE, ROTATION_BASE, SPAWN_JITTER_X, SPAWN_JITTER_Y};
use crate::spawn::{CandidateKind, SpawnCandidate, ordered_candidates};
use crate::structure::{StructureLayouts, StructureStamper};

/// Counts of what one pass produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PassStats {
    pub spawn_points: usize,
    pub props: usize,
    pub entities: usize,
    pub items: usize,
    pub structures: usize,
    pub tiles: usize,
}

/// Borrowed view of everything a pass reads and the collections it appends to.
pub(crate) struct ChunkPass<'w> {
    pub seed: i64,
    pub config: &'w WorldGenConfig,
    pub spawn: &'w SpawnConfig,
    pub classifier: &'w BiomeClassifier,
    pub assets: &'w AssetRegistry,
    pub layouts: &'w StructureLayouts,
    pub probe: &'w dyn CollisionProbe,
    pub chunk: &'w mut Chunk,
    pub entities: &'w mut Vec<Entity>,
    pub items: &'w mut Vec<Item>,
}

impl ChunkPass<'_> {
    /// Populates the chunk. On error the caller discards everything appended.
    pub fn run(mut self) -> Result<PassStats, WorldGenError> {
        let coord = self.chunk.coord();
        let bounds = self.chunk.bounds();
        let mut colliders = self.existing_colliders()?;
        let mut stats = PassStats::default();

        let chunk_seed = seed::chunk_seed(self.seed, coord.x, coord.y);
        let step = self.config.spawn_step;
        let jitter = self.config.spawn_jitter * step;
        let per_axis = (self.config.chunk_size / step).ceil() as i64;

        for ix in 0..per_axis {
            for iy in 0..per_axis {
                let local = DVec2::new(ix as f64, iy as f64) * step + step / 2.0;
                if local.x >= self.config.chunk_size || local.y >= self.config.chunk_size {
                    continue;
                }
                let point_seed = seed::spawn_point_seed(chunk_seed, ix, iy);
                let offset = DVec2::new(
                    seed::roll(point_seed, SPAWN_JITTER_X) - 0.5,
                    seed::roll(point_seed, SPAWN_JITTER_Y) - 0.5,
                ) * jitter;
                stats.spawn_points += 1;
                self.spawn_at(bounds.min + local + offset, point_seed, &mut colliders, &mut stats)?;
            }
        }
        Ok(stats)
    }

    /// Colliders of world entities and items whose hitbox reaches into the chunk.
    ///
    /// An element centred in a neighbouring chunk still blocks placement here
    /// if its box crosses the boundary.
    fn existing_colliders(&self) -> Result<Vec<Collider>, WorldGenError> {
        let bounds = self.chunk.bounds();
        let entities = self
            .entities
            .iter()
            .map(|e| (CandidateKind::Entity, &e.placement));
        let items = self
            .items
            .iter()
            .map(|i| (CandidateKind::Item, &i.placement));

        let mut colliders = Vec::new();
        for (kind, placement) in entities.chain(items) {
            let footprint = self.footprint(kind.element_kind(), &placement.texture, placement.scale)?;
            let collider = footprint.collider_at(placement.position);
            if collider.hitbox.overlaps(&bounds) {
                colliders.push(collider);
            }
        }
        Ok(colliders)
    }

    fn footprint(
        &self,
        kind: ElementKind,
        texture: &str,
        scale: f64,
    ) -> Result<SpriteFootprint, WorldGenError> {
        Ok(SpriteFootprint::resolve(
            self.assets,
            kind,
            texture,
            scale,
            self.config.pixel_scale,
            self.config.default_hitbox_height_scale,
        )?)
    }

    fn spawn_at(
        &mut self,
        point: DVec2,
        point_seed: i64,
        colliders: &mut Vec<Collider>,
        stats: &mut PassStats,
    ) -> Result<(), WorldGenError> {
        let classifier = self.classifier;
        let biome = classifier.biome_at_location(point);
        let def = classifier.registry().get(biome.biome);

        for (i, candidate) in ordered_candidates(def, point_seed).into_iter().enumerate() {
            let i = i as i64;
            if seed::roll(point_seed, DENSITY_BASE + i) >= candidate.effective_density(self.spawn) {
                continue;
            }

            let placed = match candidate {
                SpawnCandidate::Structure(entry) => {
                    let turns = (seed::roll(point_seed, ROTATION_BASE + i) * 4.0).floor() as u8;
                    let before = self.chunk.tiles().len();
                    let stamper =
                        StructureStamper::new(self.layouts, self.probe, self.config.tile_size);
                    let placed = stamper.place(self.chunk, entry, point, turns, colliders)?;
                    if placed {
                        stats.structures += 1;
                        stats.tiles += self.chunk.tiles().len() - before;
                    }
                    placed
                }
                _ => {
                    let flipped = seed::roll(point_seed, FLIP_BASE + i) < 0.5;
                    self.place_simple(candidate, point, flipped, colliders, stats)?
                }
            };

            if placed {
                break;
            }
            tracing::trace!(
                kind = %candidate.kind(),
                label = candidate.label(),
                x = point.x,
                y = point.y,
                "placement rejected"
            );
        }
        Ok(())
    }

    fn place_simple(
        &mut self,
        candidate: SpawnCandidate<'_>,
        point: DVec2,
        flipped: bool,
        colliders: &mut Vec<Collider>,
        stats: &mut PassStats,
    ) -> Result<bool, WorldGenError> {
        let (texture, scale) = match candidate {
            SpawnCandidate::Prop(p) => (&p.texture, p.scale),
            SpawnCandidate::Entity(e) => (&e.texture, e.scale),
            SpawnCandidate::Item(i) => (&i.texture, 1.0),
            SpawnCandidate::Structure(_) => return Ok(false),
        };
        let footprint = self.footprint(candidate.kind().element_kind(), texture, scale)?;

        let bounds = self.chunk.bounds();
        let half = footprint.half_size();
        let position = DVec2::new(
            clamp_or_center(point.x, bounds.min.x + half.x, bounds.max.x - half.x),
            clamp_or_center(point.y, bounds.min.y + half.y, bounds.max.y - half.y),
        );

        let collider = footprint.collider_at(position);
        if self.probe.collides(&collider.hitbox, colliders, false) {
            return Ok(false);
        }
        colliders.push(collider);

        let placement = Placement {
            position,
            texture: texture.clone(),
            scale,
            flipped,
        };
        let origin = self.chunk.coord();
        match candidate {
            SpawnCandidate::Prop(_) => {
                self.chunk.push_prop(Prop { placement });
                stats.props += 1;
            }
            SpawnCandidate::Entity(e) => {
                self.entities.push(Entity {
                    placement,
                    stats: e.stats.clone(),
                    origin,
                    velocity: DVec2::ZERO,
                });
                stats.entities += 1;
            }
            SpawnCandidate::Item(i) => {
                self.items.push(Item {
                    placement,
                    display_name: i.display_name.clone(),
                    display_description: i.display_description.clone(),
                    data: i.item_data.clone(),
                    origin,
                });
                stats.items += 1;
            }
            SpawnCandidate::Structure(_) => {}
        }
        Ok(true)
    }
}
