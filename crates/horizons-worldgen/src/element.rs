//! Elements materialized by chunk generation.
//!
//! Props and tiles belong to the chunk that spawned them. Entities and items
//! live in the world lists because they can move or be picked up, and keep
//! the coordinate of the chunk they came from.

use glam::DVec2;
use horizons_assets::ElementKind;

use crate::biome::EntityStats;
use crate::chunk::ChunkCoord;
use crate::color::Rgb;
use crate::items::ItemData;

/// Fields shared by every element.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// World position. Sprites are anchored at their centre, tiles too.
    pub position: DVec2,
    pub texture: String,
    pub scale: f64,
    /// Mirrored horizontally when drawn.
    pub flipped: bool,
}

/// Static decoration.
#[derive(Clone, Debug, PartialEq)]
pub struct Prop {
    pub placement: Placement,
}

/// A creature spawned by a chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub placement: Placement,
    pub stats: EntityStats,
    pub origin: ChunkCoord,
    /// Zero at spawn. Owned by whatever simulates entities afterwards.
    pub velocity: DVec2,
}

/// A pickup spawned by a chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub placement: Placement,
    pub display_name: String,
    pub display_description: String,
    pub data: ItemData,
    pub origin: ChunkCoord,
}

/// Which part of a structure a tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileLayer {
    Wall,
    Floor,
}

/// One cell of a stamped structure.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub placement: Placement,
    pub layer: TileLayer,
    pub tint: Option<Rgb>,
    /// Side length in world units.
    pub size: f64,
}

impl Tile {
    /// Walls block movement, floors do not.
    pub fn is_collidable(&self) -> bool {
        self.layer == TileLayer::Wall
    }
}

/// A borrowed view over any generated element.
#[derive(Clone, Copy, Debug)]
pub enum WorldElement<'a> {
    Prop(&'a Prop),
    Entity(&'a Entity),
    Item(&'a Item),
    Tile(&'a Tile),
}

impl<'a> WorldElement<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            WorldElement::Prop(_) => ElementKind::Prop,
            WorldElement::Entity(_) => ElementKind::Entity,
            WorldElement::Item(_) => ElementKind::Item,
            WorldElement::Tile(_) => ElementKind::Tile,
        }
    }

    pub fn placement(&self) -> &'a Placement {
        match self {
            WorldElement::Prop(p) => &p.placement,
            WorldElement::Entity(e) => &e.placement,
            WorldElement::Item(i) => &i.placement,
            WorldElement::Tile(t) => &t.placement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(texture: &str) -> Placement {
        Placement {
            position: DVec2::new(10.0, 20.0),
            texture: texture.into(),
            scale: 1.0,
            flipped: false,
        }
    }

    #[test]
    fn test_only_walls_collide() {
        let mut tile = Tile {
            placement: placement("stone"),
            layer: TileLayer::Wall,
            tint: None,
            size: 50.0,
        };
        assert!(tile.is_collidable());
        tile.layer = TileLayer::Floor;
        assert!(!tile.is_collidable());
    }

    #[test]
    fn test_world_element_dispatch() {
        let prop = Prop {
            placement: placement("bush"),
        };
        let item = Item {
            placement: placement("potion"),
            display_name: "Potion".into(),
            display_description: String::new(),
            data: ItemData::Misc,
            origin: ChunkCoord::new(0, 0),
        };

        let elements = [WorldElement::Prop(&prop), WorldElement::Item(&item)];
        assert_eq!(elements[0].kind(), ElementKind::Prop);
        assert_eq!(elements[1].kind(), ElementKind::Item);
        assert_eq!(elements[1].placement().texture, "potion");
    }
}
