//! Chunk coordinates, chunk contents, and the chunk cache.
//!
//! The [`ChunkCache`] provides O(1) chunk lookup, insert, and removal using
//! an [`FxHashMap`](rustc_hash::FxHashMap) keyed by [`ChunkCoord`].

use std::collections::hash_map::Entry;
use std::ops::Index;

use glam::DVec2;
use horizons_math::Aabb2;
use rustc_hash::FxHashMap;

use crate::element::{Prop, Tile, WorldElement};

/// Integer position of a chunk on the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i64,
    pub y: i64,
}

impl ChunkCoord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Chunk containing a world position.
    pub fn containing(position: DVec2, chunk_size: f64) -> Self {
        Self {
            x: (position.x / chunk_size).floor() as i64,
            y: (position.y / chunk_size).floor() as i64,
        }
    }

    /// World-space square covered by this chunk.
    pub fn bounds(self, chunk_size: f64) -> Aabb2 {
        let origin = DVec2::new(self.x as f64, self.y as f64) * chunk_size;
        Aabb2::from_origin_size(origin, DVec2::splat(chunk_size))
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Props and tiles generated for one chunk.
///
/// Append-only while its generation pass runs, frozen once sealed.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    bounds: Aabb2,
    props: Vec<Prop>,
    tiles: Vec<Tile>,
    sealed: bool,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, chunk_size: f64) -> Self {
        Self {
            coord,
            bounds: coord.bounds(chunk_size),
            props: Vec::new(),
            tiles: Vec::new(),
            sealed: false,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn bounds(&self) -> Aabb2 {
        self.bounds
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns true once generation has finished.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Props then tiles as borrowed elements.
    pub fn elements(&self) -> impl Iterator<Item = WorldElement<'_>> {
        self.props
            .iter()
            .map(WorldElement::Prop)
            .chain(self.tiles.iter().map(WorldElement::Tile))
    }

    pub(crate) fn push_prop(&mut self, prop: Prop) {
        debug_assert!(!self.sealed, "chunk {} is sealed", self.coord);
        self.props.push(prop);
    }

    pub(crate) fn push_tile(&mut self, tile: Tile) {
        debug_assert!(!self.sealed, "chunk {} is sealed", self.coord);
        self.tiles.push(tile);
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }
}

/// Every chunk materialized this session.
#[derive(Clone, Debug, Default)]
pub struct ChunkCache {
    chunks: FxHashMap<ChunkCoord, Chunk>,
}

impl ChunkCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Registers an empty chunk and returns it for population.
    ///
    /// An existing chunk at `coord` is replaced.
    pub(crate) fn insert_empty(&mut self, coord: ChunkCoord, chunk_size: f64) -> &mut Chunk {
        let chunk = Chunk::new(coord, chunk_size);
        match self.chunks.entry(coord) {
            Entry::Occupied(mut slot) => {
                slot.insert(chunk);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(chunk),
        }
    }

    pub(crate) fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    pub(crate) fn remove(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(&coord)
    }

    /// Number of cached chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates over all cached coordinates.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Iterates over all cached `(coord, chunk)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &Chunk)> {
        self.chunks.iter().map(|(coord, chunk)| (*coord, chunk))
    }
}

impl Index<ChunkCoord> for ChunkCache {
    type Output = Chunk;

    /// # Panics
    ///
    /// Panics if the chunk is not cached.
    fn index(&self, coord: ChunkCoord) -> &Chunk {
        &self.chunks[&coord]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_floors_negative_positions() {
        assert_eq!(ChunkCoord::containing(DVec2::new(0.0, 0.0), 500.0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::containing(DVec2::new(499.9, 500.0), 500.0), ChunkCoord::new(0, 1));
        assert_eq!(ChunkCoord::containing(DVec2::new(-0.1, -500.0), 500.0), ChunkCoord::new(-1, -1));
    }

    #[test]
    fn test_bounds() {
        let b = ChunkCoord::new(-1, 2).bounds(500.0);
        assert_eq!(b.min, DVec2::new(-500.0, 1000.0));
        assert_eq!(b.max, DVec2::new(0.0, 1500.0));
    }

    #[test]
    fn test_cache_insert_remove() {
        let mut cache = ChunkCache::new();
        let coord = ChunkCoord::new(3, -4);
        assert!(!cache.contains(coord));

        cache.insert_empty(coord, 500.0);
        assert!(cache.contains(coord));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache[coord].coord(), coord);
        assert!(!cache[coord].is_sealed());

        assert!(cache.remove(coord).is_some());
        assert!(cache.is_empty());
        assert!(cache.get(coord).is_none());
    }

    #[test]
    #[should_panic]
    fn test_index_missing_panics() {
        let cache = ChunkCache::new();
        let _ = &cache[ChunkCoord::new(0, 0)];
    }
}
