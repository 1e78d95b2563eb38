//! Structure templates and the stamper that expands them into tiles.
//!
//! A template is a rectangular grid of wall / floor / empty cells. Stamping
//! rotates it by a seeded number of quarter turns, snaps it to the tile grid,
//! keeps it inside the chunk, and emits one tile per non-empty cell.

use std::collections::BTreeMap;

use glam::DVec2;
use horizons_math::Aabb2;
use serde::{Deserialize, Serialize};

use crate::biome::StructureSpawn;
use crate::chunk::Chunk;
use crate::collision::{Collider, CollisionProbe, tile_hitbox};
use crate::element::{Placement, Tile, TileLayer};
use crate::error::WorldGenError;

/// One cell of a structure template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellMarker {
    Wall,
    Floor,
    Empty,
}

impl CellMarker {
    /// Parses `"W"`, `"F"`, or `" "` (an empty string also counts as empty).
    pub fn parse(marker: &str) -> Option<Self> {
        match marker {
            "W" => Some(CellMarker::Wall),
            "F" => Some(CellMarker::Floor),
            " " | "" => Some(CellMarker::Empty),
            _ => None,
        }
    }

    fn layer(self) -> Option<TileLayer> {
        match self {
            CellMarker::Wall => Some(TileLayer::Wall),
            CellMarker::Floor => Some(TileLayer::Floor),
            CellMarker::Empty => None,
        }
    }
}

/// Serialized form of a template: rows of cell markers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutDef {
    pub layout: Vec<Vec<String>>,
}

/// A validated rectangular template, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureLayout {
    rows: usize,
    cols: usize,
    cells: Vec<CellMarker>,
}

impl StructureLayout {
    /// Parses rows of markers.
    ///
    /// # Errors
    ///
    /// [`WorldGenError::MalformedLayout`] for an empty or ragged grid,
    /// [`WorldGenError::InvalidMarker`] for anything but `W`, `F` or a space.
    pub fn parse(id: &str, rows: &[Vec<String>]) -> Result<Self, WorldGenError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return Err(WorldGenError::MalformedLayout(id.to_string()));
        }

        let cells = rows
            .iter()
            .flatten()
            .map(|marker| {
                CellMarker::parse(marker).ok_or_else(|| WorldGenError::InvalidMarker {
                    layout: id.to_string(),
                    marker: marker.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Marker at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> CellMarker {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of range");
        self.cells[row * self.cols + col]
    }

    /// One clockwise quarter turn: transpose, then reverse each row.
    pub fn rotate_cw(&self) -> Self {
        let (rows, cols) = (self.cols, self.rows);
        let mut cells = Vec::with_capacity(self.cells.len());
        for r in 0..rows {
            for c in 0..cols {
                cells.push(self.cell(self.rows - 1 - c, r));
            }
        }
        Self { rows, cols, cells }
    }

    /// The layout after `turns` clockwise quarter turns.
    pub fn rotated(&self, turns: u8) -> Self {
        (0..turns % 4).fold(self.clone(), |layout, _| layout.rotate_cw())
    }

    /// Non-empty cells as `(row, col, marker)`.
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize, CellMarker)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| **m != CellMarker::Empty)
            .map(|(i, m)| (i / self.cols, i % self.cols, *m))
    }
}

/// All templates a world may stamp, by id.
#[derive(Clone, Debug, Default)]
pub struct StructureLayouts {
    layouts: BTreeMap<String, StructureLayout>,
}

impl StructureLayouts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every template.
    ///
    /// # Errors
    ///
    /// Returns the first template error.
    pub fn from_defs(defs: BTreeMap<String, LayoutDef>) -> Result<Self, WorldGenError> {
        let layouts = defs
            .into_iter()
            .map(|(id, def)| StructureLayout::parse(&id, &def.layout).map(|l| (id, l)))
            .collect::<Result<_, _>>()?;
        Ok(Self { layouts })
    }

    pub fn insert(&mut self, id: impl Into<String>, layout: StructureLayout) {
        self.layouts.insert(id.into(), layout);
    }

    /// Looks up a template.
    ///
    /// # Errors
    ///
    /// Returns [`WorldGenError::UnknownLayout`] if `id` is not registered.
    pub fn get(&self, id: &str) -> Result<&StructureLayout, WorldGenError> {
        self.layouts
            .get(id)
            .ok_or_else(|| WorldGenError::UnknownLayout(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.layouts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

/// Expands structure spawn entries into chunk tiles.
pub struct StructureStamper<'a> {
    layouts: &'a StructureLayouts,
    probe: &'a dyn CollisionProbe,
    tile_size: f64,
}

impl<'a> StructureStamper<'a> {
    pub fn new(layouts: &'a StructureLayouts, probe: &'a dyn CollisionProbe, tile_size: f64) -> Self {
        Self {
            layouts,
            probe,
            tile_size,
        }
    }

    /// Tries to stamp `entry` with its top-left corner near `candidate`.
    ///
    /// Returns `Ok(false)` when the structure does not fit in the chunk or its
    /// footprint touches any existing collider, collidable or not. On success
    /// the tiles are appended to `chunk` and their colliders to `colliders`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldGenError::UnknownLayout`] if the layout id is not registered.
    pub fn place(
        &self,
        chunk: &mut Chunk,
        entry: &StructureSpawn,
        candidate: DVec2,
        turns: u8,
        colliders: &mut Vec<Collider>,
    ) -> Result<bool, WorldGenError> {
        let layout = self.layouts.get(&entry.layout)?.rotated(turns);
        let tile_size = self.tile_size;
        let size = DVec2::new(layout.cols() as f64, layout.rows() as f64) * tile_size;
        let bounds = chunk.bounds();

        if size.x > bounds.size().x || size.y > bounds.size().y {
            tracing::warn!(
                layout = %entry.layout,
                width = size.x,
                height = size.y,
                "structure larger than a chunk, skipped"
            );
            return Ok(false);
        }

        let snapped = (candidate / tile_size).floor() * tile_size;
        let origin = snapped.clamp(bounds.min, bounds.max - size);
        let footprint = Aabb2::from_origin_size(origin, size);

        if self.probe.collides(&footprint, colliders, true) {
            tracing::trace!(layout = %entry.layout, x = origin.x, y = origin.y, "structure blocked");
            return Ok(false);
        }

        for (row, col, marker) in layout.solid_cells() {
            let Some(layer) = marker.layer() else {
                continue;
            };
            let center = origin + (DVec2::new(col as f64, row as f64) + 0.5) * tile_size;
            let (texture, tint) = match layer {
                TileLayer::Wall => (&entry.wall_texture, entry.wall_tint),
                TileLayer::Floor => (&entry.floor_texture, entry.floor_tint),
            };
            let tile = Tile {
                placement: Placement {
                    position: center,
                    texture: texture.clone(),
                    scale: 1.0,
                    flipped: false,
                },
                layer,
                tint,
                size: tile_size,
            };
            colliders.push(Collider {
                hitbox: tile_hitbox(center, tile.size),
                collidable: tile.is_collidable(),
            });
            chunk.push_tile(tile);
        }
        Ok(true)
    }
}
