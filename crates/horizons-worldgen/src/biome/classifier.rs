//! Biome classifier: assigns one biome to every cell of a jittered grid.
//!
//! Each cell samples two or three slowly varying noise axes. Rare `ABOVE`
//! biomes get the first chance (rarity roll plus optional axis match); the
//! `REGION` biome whose axis target is nearest takes the rest. Arbitrary world
//! positions resolve to the nearest biome point (a Voronoi lookup).

use glam::DVec2;
use horizons_config::{AxisWeights, WorldGenConfig};

use super::{BiomeId, BiomeRegistry, GenerationAxes};
use crate::seed::{self, BIOME_JITTER_X, BIOME_JITTER_Y, BIOME_RARITY};

/// Tunables for biome classification.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifierParams {
    /// Side length of a biome cell in world units.
    pub cell_size: f64,
    /// Noise frequency applied to cell coordinates.
    pub scale: f64,
    /// Noise-field offset of the secondary axis.
    pub secondary_offset: f64,
    /// Noise-field offset of the tertiary axis.
    pub tertiary_offset: f64,
    /// Maximum weighted axis distance for an `ABOVE` biome.
    pub above_tolerance: f64,
    pub weights: AxisWeights,
}

impl From<&WorldGenConfig> for ClassifierParams {
    fn from(config: &WorldGenConfig) -> Self {
        Self {
            cell_size: config.biome_cell_size,
            scale: config.biome_scale,
            secondary_offset: config.secondary_axis_offset,
            tertiary_offset: config.tertiary_axis_offset,
            above_tolerance: config.above_tolerance,
            weights: config.axis_weights,
        }
    }
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self::from(&WorldGenConfig::default())
    }
}

/// Noise-axis values sampled for one cell, each in `[0.0, 1.0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisValues {
    pub primary: f64,
    pub secondary: f64,
    pub tertiary: f64,
}

/// A biome anchored at a concrete world position inside its grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomePoint {
    /// Grid cell that produced this point.
    pub cell: (i64, i64),
    /// Jittered world position.
    pub position: DVec2,
    pub biome: BiomeId,
    /// Axis values the biome was selected with.
    pub axes: AxisValues,
}

/// Samples biome points for a fixed seed and registry.
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    seed: i64,
    params: ClassifierParams,
    registry: BiomeRegistry,
}

impl BiomeClassifier {
    pub fn new(seed: i64, params: ClassifierParams, registry: BiomeRegistry) -> Self {
        Self {
            seed,
            params,
            registry,
        }
    }

    pub fn registry(&self) -> &BiomeRegistry {
        &self.registry
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// Noise-axis values for a grid cell.
    pub fn axes_for_cell(&self, gx: i64, gy: i64) -> AxisValues {
        let x = gx as f64 * self.params.scale;
        let y = gy as f64 * self.params.scale;
        let so = self.params.secondary_offset;
        let to = self.params.tertiary_offset;
        AxisValues {
            primary: seed::smooth_noise(x, y, self.seed),
            secondary: seed::smooth_noise(x + so, y + so, self.seed),
            tertiary: seed::smooth_noise(x + to, y + to, self.seed),
        }
    }

    /// Weighted Euclidean distance between sampled axes and a biome target.
    ///
    /// The tertiary axis only counts when the target defines it.
    pub fn axis_distance(&self, axes: &AxisValues, target: &GenerationAxes) -> f64 {
        let w = &self.params.weights;
        let dp = (axes.primary - target.primary) * w.primary;
        let ds = (axes.secondary - target.secondary) * w.secondary;
        let dt = target
            .tertiary
            .map_or(0.0, |t| (axes.tertiary - t) * w.tertiary);
        (dp * dp + ds * ds + dt * dt).sqrt()
    }

    /// The biome point for grid cell `(gx, gy)`.
    pub fn biome_point_for_cell(&self, gx: i64, gy: i64) -> BiomePoint {
        let cell_seed = seed::cell_seed(self.seed, gx, gy);
        let cell = self.params.cell_size;

        let jitter = DVec2::new(
            seed::roll(cell_seed, BIOME_JITTER_X),
            seed::roll(cell_seed, BIOME_JITTER_Y),
        );
        let position = (DVec2::new(gx as f64, gy as f64) + jitter) * cell;

        let axes = self.axes_for_cell(gx, gy);
        let scatter = seed::roll(cell_seed, BIOME_RARITY);

        let biome = self
            .select_above(&axes, scatter)
            .or_else(|| self.select_region(&axes))
            .or_else(|| self.registry.fallback())
            .unwrap_or(BiomeId(0));

        BiomePoint {
            cell: (gx, gy),
            position,
            biome,
            axes,
        }
    }

    fn select_above(&self, axes: &AxisValues, scatter: f64) -> Option<BiomeId> {
        self.registry.above().iter().copied().find(|&id| {
            let def = self.registry.get(id);
            if scatter < def.rarity {
                return false;
            }
            def.generation_axes
                .is_none_or(|target| self.axis_distance(axes, &target) <= self.params.above_tolerance)
        })
    }

    fn select_region(&self, axes: &AxisValues) -> Option<BiomeId> {
        let mut best: Option<(BiomeId, f64)> = None;
        for &id in self.registry.region() {
            let Some(target) = self.registry.get(id).generation_axes else {
                continue;
            };
            let dist = self.axis_distance(axes, &target);
            // Strict comparison keeps the earliest registered biome on ties.
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Grid cell containing a world position.
    pub fn cell_at(&self, position: DVec2) -> (i64, i64) {
        let cell = self.params.cell_size;
        (
            (position.x / cell).floor() as i64,
            (position.y / cell).floor() as i64,
        )
    }

    /// The biome point nearest to `position` among the 3x3 cells around it.
    pub fn biome_at_location(&self, position: DVec2) -> BiomePoint {
        let (gx, gy) = self.cell_at(position);
        let mut nearest = self.biome_point_for_cell(gx - 1, gy - 1);
        let mut best = nearest.position.distance_squared(position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let point = self.biome_point_for_cell(gx + dx, gy + dy);
                let dist = point.position.distance_squared(position);
                if dist < best {
                    nearest = point;
                    best = dist;
                }
            }
        }
        nearest
    }

    /// All biome points whose cells cover the given rectangle, plus a one-cell margin.
    pub fn visible_biome_points(&self, center: DVec2, width: f64, height: f64) -> Vec<BiomePoint> {
        let half = DVec2::new(width, height) * 0.5;
        let (start_x, start_y) = self.cell_at(center - half);
        let (end_x, end_y) = self.cell_at(center + half);

        let mut points = Vec::new();
        for gx in (start_x - 1)..=(end_x + 1) {
            for gy in (start_y - 1)..=(end_y + 1) {
                points.push(self.biome_point_for_cell(gx, gy));
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeCategory, BiomeDef, BiomeVisuals};
    use crate::color::Rgb;

    fn biome(name: &str, category: BiomeCategory, axes: Option<(f64, f64)>, rarity: f64) -> BiomeDef {
        BiomeDef {
            name: name.into(),
            category,
            generation_axes: axes.map(|(primary, secondary)| GenerationAxes {
                primary,
                secondary,
                tertiary: None,
            }),
            rarity,
            visuals: BiomeVisuals {
                ground_color: Rgb::new(90, 140, 60),
                ground_noise_intensity: 0.05,
            },
            props: Vec::new(),
            entities: Vec::new(),
            items: Vec::new(),
            structures: Vec::new(),
        }
    }

    fn classifier(seed: i64, defs: Vec<BiomeDef>) -> BiomeClassifier {
        let registry = BiomeRegistry::from_defs(defs).unwrap();
        BiomeClassifier::new(seed, ClassifierParams::default(), registry)
    }

    fn region_pair() -> Vec<BiomeDef> {
        vec![
            biome("lowland", BiomeCategory::Region, Some((0.2, 0.2)), 0.0),
            biome("highland", BiomeCategory::Region, Some((0.8, 0.8)), 0.0),
        ]
    }

    #[test]
    fn test_point_for_cell_deterministic() {
        let a = classifier(42, region_pair());
        let b = classifier(42, region_pair());
        for gx in -5..5 {
            for gy in -5..5 {
                assert_eq!(a.biome_point_for_cell(gx, gy), b.biome_point_for_cell(gx, gy));
            }
        }
    }

    #[test]
    fn test_point_lies_inside_its_cell() {
        let c = classifier(7, region_pair());
        let cell = c.params().cell_size;
        for gx in -10..10 {
            for gy in -10..10 {
                let p = c.biome_point_for_cell(gx, gy);
                assert!(p.position.x >= gx as f64 * cell && p.position.x < (gx + 1) as f64 * cell);
                assert!(p.position.y >= gy as f64 * cell && p.position.y < (gy + 1) as f64 * cell);
            }
        }
    }

    #[test]
    fn test_single_region_biome_always_wins() {
        let c = classifier(
            42,
            vec![biome("meadow", BiomeCategory::Region, Some((0.5, 0.5)), 0.0)],
        );
        let point = c.biome_at_location(DVec2::ZERO);
        assert_eq!(c.registry().get(point.biome).name, "meadow");

        for i in -20..20 {
            let p = c.biome_at_location(DVec2::new(i as f64 * 1234.5, i as f64 * -987.0));
            assert_eq!(p.biome, BiomeId(0));
        }
    }

    #[test]
    fn test_region_picks_nearest_target() {
        let c = classifier(3, region_pair());
        for gx in -15..15 {
            for gy in -15..15 {
                let p = c.biome_point_for_cell(gx, gy);
                let chosen = c.registry().get(p.biome).generation_axes.unwrap();
                for (_, other) in c.registry().iter() {
                    let target = other.generation_axes.unwrap();
                    assert!(
                        c.axis_distance(&p.axes, &chosen) <= c.axis_distance(&p.axes, &target)
                    );
                }
            }
        }
    }

    #[test]
    fn test_region_tie_goes_to_first_registered() {
        let c = classifier(
            11,
            vec![
                biome("first", BiomeCategory::Region, Some((0.5, 0.5)), 0.0),
                biome("second", BiomeCategory::Region, Some((0.5, 0.5)), 0.0),
            ],
        );
        for gx in 0..10 {
            assert_eq!(c.biome_point_for_cell(gx, 0).biome, BiomeId(0));
        }
    }

    #[test]
    fn test_above_without_axes_and_zero_rarity_always_wins() {
        let mut defs = region_pair();
        defs.push(biome("everywhere", BiomeCategory::Above, None, 0.0));
        let c = classifier(5, defs);
        for gx in -5..5 {
            let p = c.biome_point_for_cell(gx, 3);
            assert_eq!(c.registry().get(p.biome).name, "everywhere");
        }
    }

    #[test]
    fn test_above_with_full_rarity_never_wins() {
        let mut defs = region_pair();
        defs.push(biome("never", BiomeCategory::Above, None, 1.0));
        let c = classifier(5, defs);
        for gx in -10..10 {
            for gy in -10..10 {
                let p = c.biome_point_for_cell(gx, gy);
                assert_ne!(c.registry().get(p.biome).name, "never");
            }
        }
    }

    #[test]
    fn test_above_axis_match_respects_tolerance() {
        let mut defs = region_pair();
        defs.push(biome("crater", BiomeCategory::Above, Some((0.5, 0.5)), 0.0));
        let c = classifier(9, defs);
        let crater = c.registry().lookup_by_name("crater").unwrap();
        let target = c.registry().get(crater).generation_axes.unwrap();

        for gx in -30..30 {
            for gy in -30..30 {
                let p = c.biome_point_for_cell(gx, gy);
                let within = c.axis_distance(&p.axes, &target) <= c.params().above_tolerance;
                assert_eq!(p.biome == crater, within, "cell ({gx}, {gy})");
            }
        }
    }

    #[test]
    fn test_biome_at_location_is_nearest_point() {
        let c = classifier(21, region_pair());
        for i in 0..50 {
            let pos = DVec2::new(i as f64 * 731.0 - 15_000.0, i as f64 * -419.0 + 8_000.0);
            let chosen = c.biome_at_location(pos);
            let (gx, gy) = c.cell_at(pos);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let other = c.biome_point_for_cell(gx + dx, gy + dy);
                    assert!(
                        chosen.position.distance_squared(pos)
                            <= other.position.distance_squared(pos)
                    );
                }
            }
        }
    }

    #[test]
    fn test_visible_points_cover_rectangle_with_margin() {
        let c = classifier(1, region_pair());
        let cell = c.params().cell_size;
        // A rectangle inside a single cell still yields the 3x3 neighbourhood.
        let points = c.visible_biome_points(DVec2::splat(cell * 0.5), 10.0, 10.0);
        assert_eq!(points.len(), 9);
        assert!(points.iter().any(|p| p.cell == (-1, -1)));
        assert!(points.iter().any(|p| p.cell == (1, 1)));

        // Spanning two cells horizontally adds a column.
        let wide = c.visible_biome_points(DVec2::new(cell, cell * 0.5), cell * 0.5, 10.0);
        assert_eq!(wide.len(), 12);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = classifier(1, region_pair());
        let b = classifier(2, region_pair());
        let differs = (0..20).any(|gx| {
            a.biome_point_for_cell(gx, 0).position != b.biome_point_for_cell(gx, 0).position
        });
        assert!(differs);
    }
}
