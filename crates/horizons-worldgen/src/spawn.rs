//! Spawn candidates: one biome's spawn tables merged into a single ordered list.

use std::fmt;

use horizons_assets::ElementKind;
use horizons_config::SpawnConfig;

use crate::biome::{BiomeDef, EntitySpawn, ItemSpawn, PropSpawn, StructureSpawn};
use crate::seed;

/// Which spawn table a candidate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Prop,
    Entity,
    Item,
    Structure,
}

impl CandidateKind {
    /// Asset manifest section holding this kind's textures.
    pub fn element_kind(self) -> ElementKind {
        match self {
            CandidateKind::Prop => ElementKind::Prop,
            CandidateKind::Entity => ElementKind::Entity,
            CandidateKind::Item => ElementKind::Item,
            CandidateKind::Structure => ElementKind::Structure,
        }
    }

    /// Global density multiplier for this kind.
    pub fn multiplier(self, config: &SpawnConfig) -> f64 {
        match self {
            CandidateKind::Prop => config.prop_multiplier,
            CandidateKind::Entity => config.entity_multiplier,
            CandidateKind::Item => config.item_multiplier,
            CandidateKind::Structure => config.structure_multiplier,
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CandidateKind::Prop => "prop",
            CandidateKind::Entity => "entity",
            CandidateKind::Item => "item",
            CandidateKind::Structure => "structure",
        })
    }
}

/// One entry of a biome spawn table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnCandidate<'a> {
    Prop(&'a PropSpawn),
    Entity(&'a EntitySpawn),
    Item(&'a ItemSpawn),
    Structure(&'a StructureSpawn),
}

impl<'a> SpawnCandidate<'a> {
    pub fn kind(&self) -> CandidateKind {
        match self {
            SpawnCandidate::Prop(_) => CandidateKind::Prop,
            SpawnCandidate::Entity(_) => CandidateKind::Entity,
            SpawnCandidate::Item(_) => CandidateKind::Item,
            SpawnCandidate::Structure(_) => CandidateKind::Structure,
        }
    }

    /// Texture id, or the layout id for structures.
    pub fn label(&self) -> &'a str {
        match self {
            SpawnCandidate::Prop(p) => &p.texture,
            SpawnCandidate::Entity(e) => &e.texture,
            SpawnCandidate::Item(i) => &i.texture,
            SpawnCandidate::Structure(s) => &s.layout,
        }
    }

    pub fn density(&self) -> f64 {
        match self {
            SpawnCandidate::Prop(p) => p.density,
            SpawnCandidate::Entity(e) => e.density,
            SpawnCandidate::Item(i) => i.density,
            SpawnCandidate::Structure(s) => s.density,
        }
    }

    /// Density after the per-kind multiplier.
    pub fn effective_density(&self, config: &SpawnConfig) -> f64 {
        self.density() * self.kind().multiplier(config)
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, SpawnCandidate::Structure(_))
    }
}

/// Every spawn table entry of `def`, as candidates.
pub fn candidates(def: &BiomeDef) -> impl Iterator<Item = SpawnCandidate<'_>> {
    def.props
        .iter()
        .map(SpawnCandidate::Prop)
        .chain(def.entities.iter().map(SpawnCandidate::Entity))
        .chain(def.items.iter().map(SpawnCandidate::Item))
        .chain(def.structures.iter().map(SpawnCandidate::Structure))
}

/// Candidates for one spawn point: shuffled by `seed`, structures first.
///
/// The structure move is a stable sort, so both groups keep their shuffled order.
pub fn ordered_candidates(def: &BiomeDef, seed: i64) -> Vec<SpawnCandidate<'_>> {
    let mut list: Vec<_> = candidates(def).collect();
    seed::shuffle_seeded(&mut list, seed);
    list.sort_by_key(|c| !c.is_structure());
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeCategory, BiomeVisuals, EntityStats};
    use crate::color::Rgb;
    use crate::items::ItemData;

    fn biome() -> BiomeDef {
        BiomeDef {
            name: "ruins".into(),
            category: BiomeCategory::Above,
            generation_axes: None,
            rarity: 0.0,
            visuals: BiomeVisuals {
                ground_color: Rgb::new(120, 110, 90),
                ground_noise_intensity: 0.0,
            },
            props: ["rubble", "pillar", "weeds"]
                .into_iter()
                .map(|t| PropSpawn {
                    texture: t.into(),
                    density: 0.5,
                    scale: 1.0,
                })
                .collect(),
            entities: vec![EntitySpawn {
                texture: "rat".into(),
                density: 0.4,
                scale: 1.0,
                stats: EntityStats::default(),
            }],
            items: vec![ItemSpawn {
                texture: "coin".into(),
                density: 0.2,
                display_name: "Coin".into(),
                display_description: String::new(),
                item_data: ItemData::Misc,
            }],
            structures: ["hut", "tower"]
                .into_iter()
                .map(|l| StructureSpawn {
                    layout: l.into(),
                    density: 0.3,
                    wall_texture: "stone".into(),
                    floor_texture: "planks".into(),
                    wall_tint: None,
                    floor_tint: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_structures_come_first() {
        let def = biome();
        for seed in 0..50 {
            let list = ordered_candidates(&def, seed);
            assert_eq!(list.len(), 7);
            assert!(list[..2].iter().all(SpawnCandidate::is_structure));
            assert!(!list[2..].iter().any(SpawnCandidate::is_structure));
        }
    }

    #[test]
    fn test_order_is_deterministic_and_seeded() {
        let def = biome();
        let labels = |seed: i64| {
            ordered_candidates(&def, seed)
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(17), labels(17));
        assert!((0..20).any(|s| labels(s) != labels(17)));
    }

    #[test]
    fn test_effective_density_applies_multiplier() {
        let def = biome();
        let config = SpawnConfig::default();
        let entity = SpawnCandidate::Entity(&def.entities[0]);
        assert!((entity.effective_density(&config) - 0.4 * config.entity_multiplier).abs() < 1e-12);
        assert_eq!(entity.kind().element_kind(), ElementKind::Entity);
        assert_eq!(entity.kind().to_string(), "entity");
    }
}
