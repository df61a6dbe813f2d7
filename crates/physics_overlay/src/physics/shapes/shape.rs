//! Collision shape handle with identity, margin and scale
//!
//! A [`CollisionShape`] wraps one [`ShapeKind`] plus the mutable properties the
//! debug overlay watches. Identity is carried by [`ShapeId`]: cloning a shape
//! yields another handle to the *same* shape (same id), while
//! [`CollisionShape::duplicate`] makes an independent copy with a fresh id.

use std::sync::atomic::{AtomicU64, Ordering};

use super::compound::CompoundShape;
use super::primitives::{
    box_inertia, BoxShape, CapsuleShape, ConeShape, CylinderShape, HullShape,
    MultiSphereShape, SimplexShape, SphereShape,
};
use crate::foundation::bounds::Aabb;
use crate::foundation::math::{Axis, Vec3};
use crate::physics::error::{ShapeError, ShapeResult};

/// Collision margin assigned to new shapes
pub const DEFAULT_MARGIN: f32 = 0.04;

/// Identity of a collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl ShapeId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric id
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Tagged variant over every supported shape kind
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Rectangular box
    Box(BoxShape),
    /// Sphere
    Sphere(SphereShape),
    /// Cylinder
    Cylinder(CylinderShape),
    /// Cone
    Cone(ConeShape),
    /// Capsule
    Capsule(CapsuleShape),
    /// Rounded box built from spheres
    MultiSphere(MultiSphereShape),
    /// Convex hull over a point cloud
    Hull(HullShape),
    /// One to four points
    Simplex(SimplexShape),
    /// Children with local offsets
    Compound(CompoundShape),
}

impl ShapeKind {
    /// Short lowercase name, used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Box(_) => "box",
            Self::Sphere(_) => "sphere",
            Self::Cylinder(_) => "cylinder",
            Self::Cone(_) => "cone",
            Self::Capsule(_) => "capsule",
            Self::MultiSphere(_) => "multi-sphere",
            Self::Hull(_) => "hull",
            Self::Simplex(_) => "simplex",
            Self::Compound(_) => "compound",
        }
    }
}

/// A collision shape (stored in MODEL SPACE)
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionShape {
    id: ShapeId,
    kind: ShapeKind,
    margin: f32,
    scale: Vec3,
}

impl CollisionShape {
    fn from_kind(kind: ShapeKind) -> Self {
        Self {
            id: ShapeId::next(),
            kind,
            margin: DEFAULT_MARGIN,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Box with the given half extents
    pub fn box_shape(half_x: f32, half_y: f32, half_z: f32) -> ShapeResult<Self> {
        BoxShape::new(Vec3::new(half_x, half_y, half_z)).map(|b| Self::from_kind(ShapeKind::Box(b)))
    }

    /// Cube with the given half extent
    pub fn cube(half_extent: f32) -> ShapeResult<Self> {
        Self::box_shape(half_extent, half_extent, half_extent)
    }

    /// Sphere
    pub fn sphere(radius: f32) -> ShapeResult<Self> {
        SphereShape::new(radius).map(|s| Self::from_kind(ShapeKind::Sphere(s)))
    }

    /// Cylinder with its height along `axis`
    pub fn cylinder(radius: f32, height: f32, axis: Axis) -> ShapeResult<Self> {
        CylinderShape::new(radius, height, axis).map(|c| Self::from_kind(ShapeKind::Cylinder(c)))
    }

    /// Cone pointing along `axis`
    pub fn cone(radius: f32, height: f32, axis: Axis) -> ShapeResult<Self> {
        ConeShape::new(radius, height, axis).map(|c| Self::from_kind(ShapeKind::Cone(c)))
    }

    /// Capsule along `axis`; `height` excludes the caps
    pub fn capsule(radius: f32, height: f32, axis: Axis) -> ShapeResult<Self> {
        CapsuleShape::new(radius, height, axis).map(|c| Self::from_kind(ShapeKind::Capsule(c)))
    }

    /// Multi-sphere approximating a rectangular solid
    pub fn multi_sphere(half_extents: Vec3) -> ShapeResult<Self> {
        MultiSphereShape::from_rectangular_solid(half_extents)
            .map(|m| Self::from_kind(ShapeKind::MultiSphere(m)))
    }

    /// Convex hull over a point cloud
    pub fn hull(points: Vec<Vec3>) -> ShapeResult<Self> {
        HullShape::new(points).map(|h| Self::from_kind(ShapeKind::Hull(h)))
    }

    /// Simplex through one to four points
    pub fn simplex(points: Vec<Vec3>) -> ShapeResult<Self> {
        SimplexShape::new(points).map(|s| Self::from_kind(ShapeKind::Simplex(s)))
    }

    /// Wrap an assembled compound
    pub fn compound(compound: CompoundShape) -> Self {
        Self::from_kind(ShapeKind::Compound(compound))
    }

    /// Independent copy with a new identity
    pub fn duplicate(&self) -> Self {
        Self {
            id: ShapeId::next(),
            ..self.clone()
        }
    }

    /// Identity of this shape
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// The shape's kind and dimensions
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Replace the kind and dimensions; the shape gets a new identity
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
        self.id = ShapeId::next();
    }

    /// Whether this is a compound shape (children may change under a fixed id)
    pub fn is_compound(&self) -> bool {
        matches!(self.kind, ShapeKind::Compound(_))
    }

    /// The compound payload, if any
    pub fn as_compound(&self) -> Option<&CompoundShape> {
        match &self.kind {
            ShapeKind::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Mutable compound payload, if any
    pub fn as_compound_mut(&mut self) -> Option<&mut CompoundShape> {
        match &mut self.kind {
            ShapeKind::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Collision margin
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Alter the collision margin
    pub fn set_margin(&mut self, margin: f32) -> ShapeResult<()> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ShapeError::InvalidMargin(margin));
        }
        self.margin = margin;
        Ok(())
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Alter the scale factors
    pub fn set_scale(&mut self, scale: Vec3) -> ShapeResult<()> {
        if !scale.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(ShapeError::InvalidScale([scale.x, scale.y, scale.z]));
        }
        self.scale = scale;
        Ok(())
    }

    /// Volume after scaling
    ///
    /// Hulls have no closed-form volume and report
    /// [`ShapeError::VolumeUnavailable`]. Compounds sum their children.
    pub fn scaled_volume(&self) -> ShapeResult<f32> {
        let unscaled = match &self.kind {
            ShapeKind::Box(b) => b.volume(),
            ShapeKind::Sphere(s) => s.volume(),
            ShapeKind::Cylinder(c) => c.volume(),
            ShapeKind::Cone(c) => c.volume(),
            ShapeKind::Capsule(c) => c.volume(),
            ShapeKind::MultiSphere(m) => m.volume(),
            ShapeKind::Simplex(s) => s.volume(),
            ShapeKind::Hull(_) => return Err(ShapeError::VolumeUnavailable(self.kind.name())),
            ShapeKind::Compound(compound) => compound.list_volumes()?.iter().sum::<f32>(),
        };
        Ok(unscaled * self.scale.x * self.scale.y * self.scale.z)
    }

    /// Model-space bounds after scaling
    pub fn local_aabb(&self) -> Aabb {
        let unscaled = match &self.kind {
            ShapeKind::Box(b) => b.aabb(),
            ShapeKind::Sphere(s) => s.aabb(),
            ShapeKind::Cylinder(c) => c.aabb(),
            ShapeKind::Cone(c) => c.aabb(),
            ShapeKind::Capsule(c) => c.aabb(),
            ShapeKind::MultiSphere(m) => m.aabb(),
            ShapeKind::Hull(h) => h.aabb(),
            ShapeKind::Simplex(s) => s.aabb(),
            ShapeKind::Compound(compound) => compound.aabb(),
        };
        unscaled.scaled(&self.scale)
    }

    /// Principal moments of inertia about the shape's own origin
    pub fn local_inertia(&self, mass: f32) -> Vec3 {
        match &self.kind {
            ShapeKind::Box(b) => box_inertia(mass, &b.half_extents().component_mul(&self.scale)),
            ShapeKind::Sphere(s) => {
                let radius = s.radius() * self.scale.max();
                Vec3::repeat(0.4 * mass * radius * radius)
            }
            ShapeKind::Cylinder(c) if self.scale == Vec3::new(1.0, 1.0, 1.0) => c.inertia(mass),
            _ => box_inertia(mass, &self.local_aabb().extents()),
        }
    }
}
