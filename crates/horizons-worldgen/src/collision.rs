//! Hitboxes and the collision probe used to validate placements.
//!
//! Tiles occupy their full square. Sprites use a trimmed box: a little is
//! taken off each side and only the lower part of the sprite (the "feet",
//! controlled by the hitbox height scale) blocks.

use glam::DVec2;
use horizons_assets::{AssetError, AssetRegistry, ElementKind};
use horizons_math::Aabb2;

/// Horizontal inset of a sprite hitbox per unit of scale.
const SIDE_INSET: f64 = 10.0;
/// Bottom inset of a sprite hitbox per unit of scale.
const BOTTOM_INSET: f64 = 2.0;

/// A placed hitbox and whether it blocks other simple elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub hitbox: Aabb2,
    pub collidable: bool,
}

/// Decides whether a candidate hitbox may be placed among existing colliders.
pub trait CollisionProbe {
    /// Returns true if the two boxes intersect.
    fn intersects(&self, a: &Aabb2, b: &Aabb2) -> bool;

    /// Returns true if `target` hits any collider.
    ///
    /// A strict check considers every collider; otherwise only collidable ones count.
    fn collides(&self, target: &Aabb2, colliders: &[Collider], strict: bool) -> bool {
        colliders
            .iter()
            .filter(|c| strict || c.collidable)
            .any(|c| self.intersects(target, &c.hitbox))
    }
}

/// Default probe: positive-area AABB overlap.
#[derive(Clone, Copy, Debug, Default)]
pub struct AabbProbe;

impl CollisionProbe for AabbProbe {
    fn intersects(&self, a: &Aabb2, b: &Aabb2) -> bool {
        a.overlaps(b)
    }
}

/// Full box of a tile centred at `center`.
pub fn tile_hitbox(center: DVec2, size: f64) -> Aabb2 {
    Aabb2::from_center_size(center, DVec2::splat(size))
}

/// Trimmed hitbox of a sprite of `size` (already scaled) centred at `position`.
pub fn sprite_hitbox(position: DVec2, size: DVec2, scale: f64, height_scale: f64) -> Aabb2 {
    let half_w = size.x / 2.0;
    Aabb2::from_edges(
        position.x - half_w + SIDE_INSET * scale,
        position.x + half_w - SIDE_INSET * scale,
        position.y - size.y * (height_scale - 0.5),
        position.y + size.y / 2.0 - BOTTOM_INSET * scale,
    )
}

/// Resolved on-screen footprint of one texture at one scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteFootprint {
    /// Sprite size in world units.
    pub size: DVec2,
    pub scale: f64,
    pub height_scale: f64,
    pub collidable: bool,
}

impl SpriteFootprint {
    /// Looks up `texture` and scales its natural size.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Unknown`] if the texture is not registered under `kind`.
    pub fn resolve(
        assets: &AssetRegistry,
        kind: ElementKind,
        texture: &str,
        scale: f64,
        pixel_scale: f64,
        default_height_scale: f64,
    ) -> Result<Self, AssetError> {
        let meta = assets.get(kind, texture)?;
        Ok(Self {
            size: meta.sprite_size(pixel_scale, scale),
            scale,
            height_scale: meta.hitbox_height_scale.unwrap_or(default_height_scale),
            collidable: meta.collidable,
        })
    }

    pub fn half_size(&self) -> DVec2 {
        self.size * 0.5
    }

    pub fn hitbox_at(&self, position: DVec2) -> Aabb2 {
        sprite_hitbox(position, self.size, self.scale, self.height_scale)
    }

    pub fn collider_at(&self, position: DVec2) -> Collider {
        Collider {
            hitbox: self.hitbox_at(position),
            collidable: self.collidable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizons_assets::AssetMeta;

    fn collider(x0: f64, y0: f64, x1: f64, y1: f64, collidable: bool) -> Collider {
        Collider {
            hitbox: Aabb2::new(DVec2::new(x0, y0), DVec2::new(x1, y1)),
            collidable,
        }
    }

    #[test]
    fn test_strict_checks_every_collider() {
        let colliders = [collider(0.0, 0.0, 10.0, 10.0, false)];
        let target = Aabb2::new(DVec2::new(5.0, 5.0), DVec2::new(15.0, 15.0));
        assert!(AabbProbe.collides(&target, &colliders, true));
        assert!(!AabbProbe.collides(&target, &colliders, false));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let colliders = [collider(0.0, 0.0, 50.0, 50.0, true)];
        let neighbour = tile_hitbox(DVec2::new(75.0, 25.0), 50.0);
        assert!(!AabbProbe.collides(&neighbour, &colliders, true));
    }

    #[test]
    fn test_sprite_hitbox_trims_sides_and_top() {
        // 100x200 sprite at scale 1, height scale 0.3.
        let hb = sprite_hitbox(DVec2::new(0.0, 0.0), DVec2::new(100.0, 200.0), 1.0, 0.3);
        assert_eq!(hb.min.x, -40.0);
        assert_eq!(hb.max.x, 40.0);
        assert!((hb.min.y - 40.0).abs() < 1e-9);
        assert_eq!(hb.max.y, 98.0);
    }

    #[test]
    fn test_footprint_uses_asset_metadata() {
        let mut assets = AssetRegistry::new();
        assets
            .register(
                ElementKind::Prop,
                "rock",
                AssetMeta {
                    collidable: true,
                    natural_width: 4.0,
                    natural_height: 3.0,
                    hitbox_height_scale: Some(0.5),
                },
            )
            .unwrap();

        let fp = SpriteFootprint::resolve(&assets, ElementKind::Prop, "rock", 2.0, 10.0, 0.3)
            .unwrap();
        assert_eq!(fp.size, DVec2::new(80.0, 60.0));
        assert_eq!(fp.height_scale, 0.5);
        assert!(fp.collider_at(DVec2::ZERO).collidable);

        let missing = SpriteFootprint::resolve(&assets, ElementKind::Entity, "rock", 1.0, 10.0, 0.3);
        assert!(matches!(missing, Err(AssetError::Unknown { .. })));
    }
}
