//! Collision shape model
//!
//! # Module Organization
//!
//! - [`primitives`] - Convex primitives with validated dimensions
//! - [`compound`] - Ordered child lists, volumes and principal axes
//! - [`shape`] - The [`CollisionShape`] handle (identity, margin, scale)
//!
//! Shapes are stored in MODEL SPACE. The debug overlay compares a shape's
//! [`ShapeId`], margin and scale each frame to decide whether its debug mesh
//! is stale.

pub mod primitives;
pub mod compound;
pub mod shape;

pub use primitives::{
    BoxShape, CapsuleShape, ConeShape, CylinderShape, HullShape, MultiSphereShape,
    SimplexShape, SphereShape,
};
pub use compound::{ChildShape, CompoundShape};
pub use shape::{CollisionShape, ShapeId, ShapeKind, DEFAULT_MARGIN};
