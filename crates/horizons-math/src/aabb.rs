use glam::DVec2;

/// Axis-aligned bounding box in 2D world space (y grows downwards).
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb2 {
    /// Create an AABB from two corners. Automatically sorts
    /// components so that min <= max on every axis.
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB from its left/right/top/bottom edges.
    pub fn from_edges(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self::new(DVec2::new(left, top), DVec2::new(right, bottom))
    }

    /// Create an AABB from a center point and full size.
    pub fn from_center_size(center: DVec2, size: DVec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create an AABB from its top-left corner and size.
    pub fn from_origin_size(origin: DVec2, size: DVec2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns true if `other` lies entirely inside this box (edges included).
    pub fn contains_aabb(&self, other: &Aabb2) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Returns true if the two boxes share a region of positive area.
    ///
    /// Boxes that only touch along an edge do not overlap, so adjacent tiles
    /// of a wall never count as colliding with each other.
    pub fn overlaps(&self, other: &Aabb2) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Returns the smallest AABB enclosing both self and other.
    pub fn union(&self, other: &Aabb2) -> Aabb2 {
        Aabb2 {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Returns a new AABB shrunk by `margin` on each side (grown if negative).
    pub fn shrink_by(&self, margin: f64) -> Aabb2 {
        Aabb2::new(self.min + DVec2::splat(margin), self.max - DVec2::splat(margin))
    }

    /// Returns true if the AABB has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y
    }
}

/// Clamp `value` into `[lo, hi]`, or return the midpoint when the range is
/// inverted (the object is wider than the space it has to fit in).
pub fn clamp_or_center(value: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabb(x0: f64, y0: f64, x1: f64, y1: f64) -> Aabb2 {
        Aabb2::new(DVec2::new(x0, y0), DVec2::new(x1, y1))
    }

    #[test]
    fn test_contains_point_on_edge() {
        let b = aabb(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains_point(DVec2::new(0.0, 0.0)));
        assert!(b.contains_point(DVec2::new(10.0, 5.0)));
        assert!(!b.contains_point(DVec2::new(10.5, 5.0)));
    }

    #[test]
    fn test_overlaps_overlapping() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(5.0, 5.0, 15.0, 15.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlaps_disjoint() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(20.0, 20.0, 30.0, 30.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = aabb(0.0, 0.0, 100.0, 100.0);
        let inner = aabb(40.0, 40.0, 60.0, 60.0);
        assert!(outer.overlaps(&inner));
        assert!(outer.contains_aabb(&inner));
        assert!(!inner.contains_aabb(&outer));
    }

    #[test]
    fn test_from_edges_and_center() {
        let b = Aabb2::from_edges(-5.0, 5.0, -2.0, 2.0);
        assert_eq!(b.center(), DVec2::ZERO);
        assert_eq!(b.size(), DVec2::new(10.0, 4.0));

        let c = Aabb2::from_center_size(DVec2::new(1.0, 1.0), DVec2::new(2.0, 4.0));
        assert_eq!(c.min, DVec2::new(0.0, -1.0));
        assert_eq!(c.max, DVec2::new(2.0, 3.0));
    }

    #[test]
    fn test_constructor_auto_sorts() {
        let b = aabb(10.0, 10.0, 0.0, 0.0);
        assert_eq!(b.min, DVec2::ZERO);
        assert_eq!(b.max, DVec2::splat(10.0));
    }

    #[test]
    fn test_union_encloses_both() {
        let u = aabb(0.0, 0.0, 5.0, 5.0).union(&aabb(3.0, -2.0, 10.0, 4.0));
        assert_eq!(u.min, DVec2::new(0.0, -2.0));
        assert_eq!(u.max, DVec2::new(10.0, 5.0));
    }

    #[test]
    fn test_clamp_or_center() {
        assert_eq!(clamp_or_center(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_or_center(13.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_or_center(4.0, 0.0, 10.0), 4.0);
        // Inverted range: the object cannot fit, so it sits in the middle.
        assert_eq!(clamp_or_center(4.0, 6.0, 2.0), 4.0);
    }
}
