//! Compound shapes: ordered children with local offsets
//!
//! Besides assembly, a compound can report per-child volumes and compute its
//! principal axes of inertia for a given per-child mass distribution. Volumes,
//! masses and children are matched by position, so callers must keep the
//! three sequences in the same order.

use nalgebra::{Rotation3, SymmetricEigen};

use super::shape::CollisionShape;
use crate::foundation::bounds::Aabb;
use crate::foundation::math::{Mat3, Quat, Transform, Vec3};
use crate::physics::error::{ShapeError, ShapeResult};

/// One child of a compound shape
#[derive(Debug, Clone, PartialEq)]
pub struct ChildShape {
    /// Child geometry (clones alias the same shape identity)
    pub shape: CollisionShape,
    /// Offset of the child's origin in the compound's frame
    pub offset: Vec3,
    /// Orientation of the child in the compound's frame
    pub rotation: Quat,
}

impl ChildShape {
    /// The child's placement as a transform
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.offset, self.rotation)
    }
}

/// Ordered list of child shapes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundShape {
    children: Vec<ChildShape>,
}

impl CompoundShape {
    /// Create an empty compound
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child at the compound's origin
    pub fn add_child(&mut self, shape: CollisionShape) {
        self.add_child_at(shape, Vec3::zeros());
    }

    /// Add a child translated by `offset`
    pub fn add_child_at(&mut self, shape: CollisionShape, offset: Vec3) {
        self.add_child_transformed(shape, offset, Quat::identity());
    }

    /// Add a child with an offset and orientation
    pub fn add_child_transformed(&mut self, shape: CollisionShape, offset: Vec3, rotation: Quat) {
        self.children.push(ChildShape { shape, offset, rotation });
    }

    /// Children in insertion order
    pub fn children(&self) -> &[ChildShape] {
        &self.children
    }

    /// Mutable children, for in-place edits that keep the compound's identity
    pub fn children_mut(&mut self) -> &mut Vec<ChildShape> {
        &mut self.children
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the compound has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Scaled volume of each child, in child order
    pub fn list_volumes(&self) -> ShapeResult<Vec<f32>> {
        self.children
            .iter()
            .map(|child| child.shape.scaled_volume())
            .collect()
    }

    /// Bounds of all children in the compound's frame
    pub fn aabb(&self) -> Aabb {
        self.children
            .iter()
            .map(|child| child.shape.local_aabb().transformed(&child.offset, &child.rotation))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Aabb::new(Vec3::zeros(), Vec3::zeros()))
    }

    /// Principal axes for the given child masses
    ///
    /// Returns the transform from the principal frame to the compound frame
    /// (center of mass plus principal rotation) and the principal moments.
    pub fn principal_axes(&self, masses: &[f32]) -> ShapeResult<(Transform, Vec3)> {
        if self.children.is_empty() {
            return Err(ShapeError::EmptyCompound);
        }
        if masses.len() != self.children.len() {
            return Err(ShapeError::MassCountMismatch {
                expected: self.children.len(),
                actual: masses.len(),
            });
        }
        let total_mass: f32 = masses.iter().sum();
        if !total_mass.is_finite() || total_mass <= 0.0 {
            return Err(ShapeError::NonPositiveMass(total_mass));
        }

        let center = self
            .children
            .iter()
            .zip(masses)
            .map(|(child, &mass)| child.offset * mass)
            .sum::<Vec3>()
            / total_mass;

        let mut tensor = Mat3::zeros();
        for (child, &mass) in self.children.iter().zip(masses) {
            // child inertia rotated into the compound frame
            let basis = child.rotation.to_rotation_matrix().into_inner();
            let local = Mat3::from_diagonal(&child.shape.local_inertia(mass));
            tensor += basis * local * basis.transpose();

            // parallel-axis term
            let o = child.offset - center;
            tensor += (Mat3::identity() * o.norm_squared() - o * o.transpose()) * mass;
        }

        let eigen = SymmetricEigen::new(tensor);
        let mut basis = eigen.eigenvectors;
        if basis.determinant() < 0.0 {
            let flipped = -basis.column(2).into_owned();
            basis.set_column(2, &flipped);
        }
        let rotation = Quat::from_rotation_matrix(&Rotation3::from_matrix_unchecked(basis));

        Ok((Transform::from_position_rotation(center, rotation), eigen.eigenvalues))
    }

    /// Re-express every child in the principal frame
    ///
    /// Applies the inverse of `principal` to each child so the compound's
    /// origin lands on the center of mass and its axes on the principal axes.
    pub fn correct_axes(&mut self, principal: &Transform) {
        let inverse = principal.inverse();
        for child in &mut self.children {
            let placed = inverse.combine(&child.transform());
            child.offset = placed.position;
            child.rotation = placed.rotation;
        }
    }
}
