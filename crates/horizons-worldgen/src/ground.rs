//! Ground colour under a world position.
//!
//! Each pixel takes the colour of its nearest biome point. In high quality the
//! band along the border with the second-nearest point, when that point is a
//! different biome, is drawn as a darkened mix of both, and every pixel gets a
//! little brightness noise. Low quality returns the flat biome colour.

use glam::DVec2;
use horizons_config::GroundConfig;

use crate::biome::{BiomePoint, BiomeRegistry};
use crate::color::Rgb;
use crate::seed;

/// Colour of the ground at `position`, or `None` if `points` is empty.
///
/// `points` should cover the 3x3 cell neighbourhood of `position` (see
/// [`BiomeClassifier::visible_biome_points`](crate::biome::BiomeClassifier::visible_biome_points)).
pub fn ground_color(
    position: DVec2,
    points: &[BiomePoint],
    registry: &BiomeRegistry,
    config: &GroundConfig,
    high_quality: bool,
) -> Option<Rgb> {
    let (closest, second) = two_nearest(position, points);
    let (closest, d1_sq) = closest?;
    let visuals = &registry.get(closest.biome).visuals;
    if !high_quality {
        return Some(visuals.ground_color);
    }

    let mut color = visuals.ground_color;
    let mut intensity = visuals.ground_noise_intensity;

    if let Some((second, d2_sq)) = second
        && second.biome != closest.biome
    {
        let (d1, d2) = (d1_sq.sqrt(), d2_sq.sqrt());
        let center_dist = closest.position.distance(second.position);
        if d2 - d1 < config.border_thickness * 4.0 && center_dist > 0.0 {
            // Distance to the perpendicular bisector of the two points.
            let to_edge = (d2_sq - d1_sq) / (2.0 * center_dist);
            if to_edge < config.border_thickness {
                let other_color = registry.get(second.biome).visuals.ground_color;
                color = color.mix_scaled(other_color, config.border_darkening);
                intensity = config.border_noise;
            }
        }
    }

    if intensity > 0.0 {
        let r = seed::pseudo_random(position.x * 12.9898 + position.y * 78.233);
        color = color.scaled(1.0 + (2.0 * r - 1.0) * intensity);
    }
    Some(color)
}

type Ranked<'a> = Option<(&'a BiomePoint, f64)>;

/// Closest and second-closest points by squared distance. Ties keep the
/// earlier point.
fn two_nearest(position: DVec2, points: &[BiomePoint]) -> (Ranked<'_>, Ranked<'_>) {
    let mut closest: Ranked<'_> = None;
    let mut second: Ranked<'_> = None;
    for p in points {
        let d = p.position.distance_squared(position);
        if closest.is_none_or(|(_, best)| d < best) {
            second = closest;
            closest = Some((p, d));
        } else if second.is_none_or(|(_, runner_up)| d < runner_up) {
            second = Some((p, d));
        }
    }
    (closest, second)
}
