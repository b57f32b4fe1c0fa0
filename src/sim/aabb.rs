//! Axis-aligned bounding boxes

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        }
    }
}

impl Aabb {
    /// Box centered on `center` extending `half_extents` along each axis
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Overlap test. Touching faces count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap_and_touch() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE);
        let touching = Aabb::from_center(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        let apart = Aabb::from_center(Vec3::new(0.0, 2.5, 0.0), Vec3::ONE);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_separated_on_single_axis() {
        // Overlap on x and y is not enough
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(0.0, 0.0, 3.0), Vec3::splat(0.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_center_roundtrip() {
        let c = Vec3::new(1.0, -2.0, 3.0);
        let h = Vec3::new(0.5, 0.25, 2.0);
        let b = Aabb::from_center(c, h);
        assert!(b.center().abs_diff_eq(c, 1e-6));
        assert!(b.half_extents().abs_diff_eq(h, 1e-6));
    }
}
