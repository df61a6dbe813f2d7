//! Axis-aligned bounds for point sets and shapes

use crate::foundation::math::{Quat, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box containing every point, or `None` for an empty set
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |bounds, point| bounds.including(point)))
    }

    /// Grow this box to contain a point
    pub fn including(self, point: &Vec3) -> Self {
        Self {
            min: self.min.inf(point),
            max: self.max.sup(point),
        }
    }

    /// Smallest box containing both boxes
    pub fn union(self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Bounds of this box after rotating then translating it
    pub fn transformed(&self, offset: &Vec3, rotation: &Quat) -> Self {
        let corners = self.corners().map(|corner| offset + rotation * corner);
        // corners is never empty
        Self::from_points(corners.iter()).unwrap_or(*self)
    }

    /// Scale both corners component-wise (scale components must be positive)
    pub fn scaled(&self, scale: &Vec3) -> Self {
        Self {
            min: self.min.component_mul(scale),
            max: self.max.component_mul(scale),
        }
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_from_points() {
        let points = [
            Vec3::new(-1.0, 2.0, 0.5),
            Vec3::new(3.0, -2.0, 0.0),
            Vec3::new(0.0, 0.0, 4.5),
        ];
        let bounds = Aabb::from_points(points.iter()).unwrap();

        assert_relative_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_relative_eq!(bounds.max, Vec3::new(3.0, 2.0, 4.5));
        assert_relative_eq!(bounds.center(), Vec3::new(1.0, 0.0, 2.25));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_aabb_contains_point() {
        let aabb = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));

        assert!(aabb.contains_point(Vec3::zeros()));
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_transformed_by_quarter_turn() {
        let aabb = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(2.0, 1.0, 1.0));
        let quarter = Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_2);
        let moved = aabb.transformed(&Vec3::new(0.0, 5.0, 0.0), &quarter);

        assert_relative_eq!(moved.extents(), Vec3::new(1.0, 2.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(moved.center(), Vec3::new(0.0, 5.0, 0.0), epsilon = 1e-5);
    }
}
