//! Read-only views of physics bodies
//!
//! These traits are the boundary between the debug overlay and whatever engine
//! owns the simulation. The overlay only ever reads through them.

use serde::{Deserialize, Serialize};

use super::shapes::CollisionShape;
use crate::foundation::collections::{BodyId, MaterialId};
use crate::foundation::math::{Quat, Vec3};

/// Which normals a generated debug mesh carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugMeshNormals {
    /// No normals
    #[default]
    None,
    /// One normal per facet
    Facet,
    /// Normals averaged across shared vertices
    Smooth,
    /// Normals pointing away from the shape's origin
    Sphere,
}

/// Level of detail for generated debug meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugMeshResolution {
    /// Coarse mesh
    #[default]
    Low,
    /// Fine mesh
    High,
}

/// A soft-body node pinned to a point in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Index of the anchored soft-body node
    pub node: u32,
    /// World location the node is pinned to
    pub pivot: Vec3,
}

/// Rigid-body state consumed by the debug overlay
pub trait RigidBodyView {
    /// Display name, used to name debug geometry
    fn name(&self) -> &str;

    /// The body's current collision shape
    fn collision_shape(&self) -> &CollisionShape;

    /// Normals option for the body's debug mesh
    fn debug_mesh_normals(&self) -> DebugMeshNormals;

    /// Resolution for the body's debug mesh
    fn debug_mesh_resolution(&self) -> DebugMeshResolution;

    /// Per-body material override, if any
    fn debug_material(&self) -> Option<MaterialId>;

    /// Location of the body's origin in physics space
    fn position(&self) -> Vec3;

    /// Orientation of the body in physics space
    fn rotation(&self) -> Quat;

    /// Whether collisions produce a contact response
    fn is_contact_response(&self) -> bool;

    /// Whether the body is moved kinematically
    fn is_kinematic(&self) -> bool;

    /// Whether the body is awake
    fn is_active(&self) -> bool;
}

/// Soft-body state consumed by the debug overlay
pub trait SoftBodyView {
    /// Display name, used to name debug nodes
    fn name(&self) -> &str;

    /// Node locations in physics space
    fn node_positions(&self) -> &[Vec3];

    /// Links as pairs of node indices
    fn links(&self) -> &[[u32; 2]];

    /// Faces as triples of node indices
    fn faces(&self) -> &[[u32; 3]];

    /// Face visibility: 0 hidden, 1 single-sided, 2 double-sided
    fn debug_num_sides(&self) -> u8;

    /// Centers of the body's clusters
    fn cluster_centers(&self) -> Vec<Vec3> {
        Vec::new()
    }

    /// Nodes pinned to external points
    fn anchors(&self) -> Vec<Anchor> {
        Vec::new()
    }
}

/// Live body collections of a physics space
pub trait PhysicsSpaceView {
    /// Concrete rigid-body view
    type RigidBody: RigidBodyView;
    /// Concrete soft-body view
    type SoftBody: SoftBodyView;

    /// Ids of every rigid body currently in the space
    fn rigid_body_ids(&self) -> Vec<BodyId>;

    /// Look up a rigid body
    fn rigid_body(&self, id: BodyId) -> Option<&Self::RigidBody>;

    /// Ids of every soft body currently in the space
    fn soft_body_ids(&self) -> Vec<BodyId>;

    /// Look up a soft body
    fn soft_body(&self, id: BodyId) -> Option<&Self::SoftBody>;
}
