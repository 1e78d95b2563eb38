//! 2D geometry primitives for the Horizons world generator.

mod aabb;

pub use aabb::{Aabb2, clamp_or_center};
pub use glam::DVec2;
