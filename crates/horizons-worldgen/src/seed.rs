//! Deterministic seeded generation utilities.
//!
//! Every procedural decision in the generator is a pure function of the world
//! seed and integer coordinates. Draws are decorrelated by offsetting a base
//! seed with the constants below; two independent draws must never share an
//! offset.

// ---------------------------------------------------------------------------
// Draw offsets
// ---------------------------------------------------------------------------

/// Biome point jitter along x.
pub const BIOME_JITTER_X: i64 = 0;
/// Biome point jitter along y.
pub const BIOME_JITTER_Y: i64 = 1;
/// Rarity roll gating `ABOVE` biomes.
pub const BIOME_RARITY: i64 = 30;

/// Spawn point jitter along x.
pub const SPAWN_JITTER_X: i64 = 3;
/// Spawn point jitter along y.
pub const SPAWN_JITTER_Y: i64 = 4;
/// Structure rotation roll, plus candidate index.
pub const ROTATION_BASE: i64 = 1000;
/// Fisher-Yates swap roll, plus step index.
pub const SHUFFLE_BASE: i64 = 2000;
/// Density roll, plus candidate index.
pub const DENSITY_BASE: i64 = 3000;
/// Horizontal flip roll, plus candidate index.
pub const FLIP_BASE: i64 = 4000;

/// Candidate indices a biome may use before the indexed draws overlap.
pub const CANDIDATE_SLOTS: i64 = 1000;
/// Every per-point draw offset lies in `0..DRAW_WINDOW`.
pub const DRAW_WINDOW: i64 = FLIP_BASE + CANDIDATE_SLOTS;

/// Spacing between spawn point seeds along x.
const POINT_STRIDE_X: i64 = 1_000_003;
/// Spacing between spawn point seeds along y. Larger than [`DRAW_WINDOW`].
const POINT_STRIDE_Y: i64 = 10_007;

/// Most spawn points a chunk may have along one axis.
///
/// Beyond this the last row of one column reaches into the draw window of the
/// next column and two points would share seeds.
pub const MAX_SPAWN_POINTS_PER_AXIS: i64 = (POINT_STRIDE_X - DRAW_WINDOW) / POINT_STRIDE_Y + 1;

// ---------------------------------------------------------------------------
// Scalar RNG and noise
// ---------------------------------------------------------------------------

/// Hash a scalar seed to a value in `[0, 1)`.
///
/// `fract(sin(seed) * 10000)`. Not cryptographic, but cheap and decorrelated
/// enough for jitter and density rolls. Uses `libm` so the result is identical
/// on every platform.
#[inline]
pub fn pseudo_random(seed: f64) -> f64 {
    let x = libm::sin(seed) * 10_000.0;
    let r = x - x.floor();
    // `x - floor(x)` can round up to exactly 1.0 for tiny negative x.
    if r >= 1.0 { 0.0 } else { r }
}

/// [`pseudo_random`] of `seed + offset`.
#[inline]
pub fn roll(seed: i64, offset: i64) -> f64 {
    pseudo_random(seed.wrapping_add(offset) as f64)
}

/// Value noise on the integer lattice, smoothed with `3t² - 2t³`.
///
/// Continuous in `(x, y)` and deterministic for a given seed. Output lies in `[0, 1)`.
pub fn smooth_noise(x: f64, y: f64, seed: i64) -> f64 {
    let floor_x = x.floor();
    let floor_y = y.floor();

    let u = smoothstep(x - floor_x);
    let v = smoothstep(y - floor_y);

    let seed = seed as f64;
    let hash = |i: f64, j: f64| pseudo_random(seed + i * 1341.0 + j * 4325.0);

    let g00 = hash(floor_x, floor_y);
    let g10 = hash(floor_x + 1.0, floor_y);
    let g01 = hash(floor_x, floor_y + 1.0);
    let g11 = hash(floor_x + 1.0, floor_y + 1.0);

    let x1 = g00 + (g10 - g00) * u;
    let x2 = g01 + (g11 - g01) * u;
    x1 + (x2 - x1) * v
}

#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Seed for one biome grid cell: `seed + ((gx * 73856093) ^ (gy * 19349663))`.
pub fn cell_seed(world_seed: i64, gx: i64, gy: i64) -> i64 {
    world_seed.wrapping_add(gx.wrapping_mul(73_856_093) ^ gy.wrapping_mul(19_349_663))
}

/// Seed for one generation chunk. Uses different primes than [`cell_seed`] so
/// chunk `(0, 0)` and biome cell `(0, 0)` do not share draws.
pub fn chunk_seed(world_seed: i64, cx: i64, cy: i64) -> i64 {
    world_seed.wrapping_add(cx.wrapping_mul(83_492_791) ^ cy.wrapping_mul(29_712_151))
}

/// Seed for the spawn point at local grid index `(ix, iy)` inside a chunk.
pub fn spawn_point_seed(chunk_seed: i64, ix: i64, iy: i64) -> i64 {
    chunk_seed
        .wrapping_add(ix.wrapping_mul(POINT_STRIDE_X))
        .wrapping_add(iy.wrapping_mul(POINT_STRIDE_Y))
}

/// In-place Fisher-Yates shuffle driven by [`roll`].
///
/// The permutation depends only on `seed` and the slice length.
pub fn shuffle_seeded<T>(items: &mut [T], seed: i64) {
    for i in (1..items.len()).rev() {
        let r = roll(seed, SHUFFLE_BASE + i as i64);
        let j = ((r * (i + 1) as f64) as usize).min(i);
        items.swap(i, j);
    }
}

/// A fresh world seed in `[0, 100000)`.
pub fn random_world_seed() -> i64 {
    rand::random_range(0..100_000)
}
