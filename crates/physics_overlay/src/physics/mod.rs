//! Physics-side model read by the debug overlay
//!
//! The simulation itself lives in an external engine. This module holds the
//! shape model the overlay and the demo recipes share, the read-only body views
//! the overlay consumes, and a plain in-memory [`PhysicsSpace`] that stores body
//! records for demos and tests without simulating anything.

pub mod error;
pub mod shapes;
pub mod body;
pub mod space;

pub use error::{ShapeError, ShapeResult};
pub use shapes::{ChildShape, CollisionShape, CompoundShape, ShapeId, ShapeKind};
pub use body::{
    Anchor, DebugMeshNormals, DebugMeshResolution, PhysicsSpaceView, RigidBodyView,
    SoftBodyView,
};
pub use space::{BodyFlags, PhysicsRigidBody, PhysicsSoftBody, PhysicsSpace};
