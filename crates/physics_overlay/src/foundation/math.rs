//! Math utilities and types
//!
//! Provides the fundamental math types shared by shapes, meshes and the scene tree.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3,
    Quaternion,
    Unit,
};

use serde::{Deserialize, Serialize};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Coordinate axis, used to orient cylinders, cones and capsules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Local X axis
    X,
    /// Local Y axis
    Y,
    /// Local Z axis
    Z,
}

impl Axis {
    /// Component index of this axis (0, 1 or 2)
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        let mut result = Vec3::zeros();
        result[self.index()] = 1.0;
        result
    }

    /// The two axes perpendicular to this one, in cyclic order
    pub const fn others(self) -> (Self, Self) {
        match self {
            Self::X => (Self::Y, Self::Z),
            Self::Y => (Self::Z, Self::X),
            Self::Z => (Self::X, Self::Y),
        }
    }
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.position + self.rotation * self.scale.component_mul(point)
    }

    /// Combine this transform with another (other is applied first)
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> Transform {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_rotation * (-self.position.component_mul(&inv_scale));

        Transform {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Golden ratio, used for icosahedron vertices
    pub const GOLDEN_RATIO: f32 = 1.618_034;
}

/// Bulk operations on point sets (vertex position buffers)
pub mod points {
    use super::Vec3;

    /// Arithmetic mean of a point set, or the origin if it is empty
    pub fn mean(points: &[Vec3]) -> Vec3 {
        if points.is_empty() {
            return Vec3::zeros();
        }
        let sum: Vec3 = points.iter().sum();
        sum / points.len() as f32
    }

    /// Translate every point by the same offset
    pub fn translate(points: &mut [Vec3], offset: Vec3) {
        for point in points.iter_mut() {
            *point += offset;
        }
    }

    /// Uniformly scale every point about the origin
    pub fn scale(points: &mut [Vec3], factor: f32) {
        for point in points.iter_mut() {
            *point *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_inverse_round_trip() {
        let transform = Transform::from_position_rotation(
            Vec3::new(1.0, -2.0, 3.0),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.7),
        );
        let point = Vec3::new(0.5, 0.25, -4.0);

        let moved = transform.transform_point(&point);
        let back = transform.inverse().transform_point(&moved);

        assert_relative_eq!(back, point, epsilon = 1e-5);
    }

    #[test]
    fn test_axis_others_are_perpendicular() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let (a, b) = axis.others();
            assert_relative_eq!(axis.unit().dot(&a.unit()), 0.0);
            assert_relative_eq!(axis.unit().dot(&b.unit()), 0.0);
            assert_relative_eq!(a.unit().cross(&b.unit()), axis.unit());
        }
    }

    #[test]
    fn test_points_mean_and_translate() {
        let mut cloud = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0)];
        let center = points::mean(&cloud);
        assert_relative_eq!(center, Vec3::new(1.0, 2.0, 3.0));

        points::translate(&mut cloud, -center);
        assert_relative_eq!(points::mean(&cloud), Vec3::zeros());
    }
}
