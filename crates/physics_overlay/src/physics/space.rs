//! In-memory physics space
//!
//! Stores rigid and soft body records so demos and tests can drive the debug
//! overlay. Nothing here integrates motion; callers move bodies explicitly.
//! Rigid and soft bodies live in separate slot maps, so a [`BodyId`] is only
//! meaningful together with the collection it came from.

use bitflags::bitflags;

use super::body::{
    Anchor, DebugMeshNormals, DebugMeshResolution, PhysicsSpaceView, RigidBodyView,
    SoftBodyView,
};
use super::shapes::CollisionShape;
use crate::foundation::collections::{BodyId, HandleMap, MaterialId};
use crate::foundation::math::{Quat, Vec3};

bitflags! {
    /// Rigid-body state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BodyFlags: u8 {
        /// Collisions produce a contact response
        const CONTACT_RESPONSE = 1 << 0;
        /// Body is moved kinematically
        const KINEMATIC = 1 << 1;
        /// Body is awake
        const ACTIVE = 1 << 2;
    }
}

/// Rigid-body record
#[derive(Debug, Clone)]
pub struct PhysicsRigidBody {
    name: String,
    shape: CollisionShape,
    mass: f32,
    position: Vec3,
    rotation: Quat,
    flags: BodyFlags,
    normals: DebugMeshNormals,
    resolution: DebugMeshResolution,
    debug_material: Option<MaterialId>,
    inverse_inertia: Option<Vec3>,
}

impl PhysicsRigidBody {
    /// Mass that marks a body as static
    pub const MASS_FOR_STATIC: f32 = 0.0;

    /// Create a body at the origin
    ///
    /// Static bodies (zero mass) start asleep; dynamic bodies start awake.
    pub fn new(name: impl Into<String>, shape: CollisionShape, mass: f32) -> Self {
        let mut flags = BodyFlags::CONTACT_RESPONSE;
        if mass > Self::MASS_FOR_STATIC {
            flags |= BodyFlags::ACTIVE;
        }
        Self {
            name: name.into(),
            shape,
            mass,
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            flags,
            normals: DebugMeshNormals::default(),
            resolution: DebugMeshResolution::default(),
            debug_material: None,
            inverse_inertia: None,
        }
    }

    /// Place the body (builder style)
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Mass (zero for static bodies)
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Whether the body is static
    pub fn is_static(&self) -> bool {
        self.mass <= Self::MASS_FOR_STATIC
    }

    /// State flags
    pub fn flags(&self) -> BodyFlags {
        self.flags
    }

    /// Mutable access to the collision shape (identity is preserved)
    pub fn collision_shape_mut(&mut self) -> &mut CollisionShape {
        &mut self.shape
    }

    /// Replace the collision shape
    pub fn set_collision_shape(&mut self, shape: CollisionShape) {
        self.shape = shape;
    }

    /// Move the body
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Rotate the body
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Enable or disable contact response
    pub fn set_contact_response(&mut self, enabled: bool) {
        self.flags.set(BodyFlags::CONTACT_RESPONSE, enabled);
    }

    /// Switch kinematic mode
    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.flags.set(BodyFlags::KINEMATIC, kinematic);
    }

    /// Wake or sleep the body (static bodies never wake)
    pub fn set_active(&mut self, active: bool) {
        self.flags.set(BodyFlags::ACTIVE, active && !self.is_static());
    }

    /// Choose debug-mesh normals
    pub fn set_debug_mesh_normals(&mut self, normals: DebugMeshNormals) {
        self.normals = normals;
    }

    /// Choose debug-mesh resolution
    pub fn set_debug_mesh_resolution(&mut self, resolution: DebugMeshResolution) {
        self.resolution = resolution;
    }

    /// Override the debug material, or `None` to use the state-based palette
    pub fn set_debug_material(&mut self, material: Option<MaterialId>) {
        self.debug_material = material;
    }

    /// Inverse principal inertia supplied by the shape builder, if any
    pub fn inverse_inertia(&self) -> Option<Vec3> {
        self.inverse_inertia
    }

    /// Record an explicit inverse inertia
    pub fn set_inverse_inertia(&mut self, inverse_inertia: Vec3) {
        self.inverse_inertia = Some(inverse_inertia);
    }
}

impl RigidBodyView for PhysicsRigidBody {
    fn name(&self) -> &str {
        &self.name
    }

    fn collision_shape(&self) -> &CollisionShape {
        &self.shape
    }

    fn debug_mesh_normals(&self) -> DebugMeshNormals {
        self.normals
    }

    fn debug_mesh_resolution(&self) -> DebugMeshResolution {
        self.resolution
    }

    fn debug_material(&self) -> Option<MaterialId> {
        self.debug_material
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn is_contact_response(&self) -> bool {
        self.flags.contains(BodyFlags::CONTACT_RESPONSE)
    }

    fn is_kinematic(&self) -> bool {
        self.flags.contains(BodyFlags::KINEMATIC)
    }

    fn is_active(&self) -> bool {
        self.flags.contains(BodyFlags::ACTIVE)
    }
}

/// Soft-body record: nodes, links and faces in physics space
#[derive(Debug, Clone, Default)]
pub struct PhysicsSoftBody {
    name: String,
    nodes: Vec<Vec3>,
    links: Vec<[u32; 2]>,
    faces: Vec<[u32; 3]>,
    num_sides: u8,
    clusters: Vec<Vec3>,
    anchors: Vec<Anchor>,
}

impl PhysicsSoftBody {
    /// Create an empty soft body
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_sides: 1,
            ..Default::default()
        }
    }

    /// Rectangular cloth patch in the XZ plane, centered on `center`
    ///
    /// Nodes are linked to their right and lower neighbours and each grid cell
    /// is split into two faces.
    pub fn cloth(name: impl Into<String>, rows: u32, columns: u32, spacing: f32, center: Vec3) -> Self {
        let mut body = Self::new(name);
        let rows = rows.max(1);
        let columns = columns.max(1);
        let half_x = (columns - 1) as f32 * spacing / 2.0;
        let half_z = (rows - 1) as f32 * spacing / 2.0;

        for row in 0..rows {
            for column in 0..columns {
                let x = column as f32 * spacing - half_x;
                let z = row as f32 * spacing - half_z;
                body.nodes.push(center + Vec3::new(x, 0.0, z));
            }
        }

        let index = |row: u32, column: u32| row * columns + column;
        for row in 0..rows {
            for column in 0..columns {
                if column + 1 < columns {
                    body.links.push([index(row, column), index(row, column + 1)]);
                }
                if row + 1 < rows {
                    body.links.push([index(row, column), index(row + 1, column)]);
                }
                if column + 1 < columns && row + 1 < rows {
                    let (a, b) = (index(row, column), index(row, column + 1));
                    let (c, d) = (index(row + 1, column), index(row + 1, column + 1));
                    body.faces.push([a, c, b]);
                    body.faces.push([b, c, d]);
                }
            }
        }
        body
    }

    /// Move every node by the same offset
    pub fn translate(&mut self, offset: Vec3) {
        crate::foundation::math::points::translate(&mut self.nodes, offset);
    }

    /// Choose how faces are drawn: 0 hidden, 1 single-sided, 2 double-sided
    pub fn set_debug_num_sides(&mut self, num_sides: u8) {
        self.num_sides = num_sides.min(2);
    }

    /// Replace the cluster centers
    pub fn set_cluster_centers(&mut self, centers: Vec<Vec3>) {
        self.clusters = centers;
    }

    /// Pin a node to a world location
    pub fn add_anchor(&mut self, node: u32, pivot: Vec3) {
        self.anchors.push(Anchor { node, pivot });
    }
}

impl SoftBodyView for PhysicsSoftBody {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_positions(&self) -> &[Vec3] {
        &self.nodes
    }

    fn links(&self) -> &[[u32; 2]] {
        &self.links
    }

    fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    fn debug_num_sides(&self) -> u8 {
        self.num_sides
    }

    fn cluster_centers(&self) -> Vec<Vec3> {
        self.clusters.clone()
    }

    fn anchors(&self) -> Vec<Anchor> {
        self.anchors.clone()
    }
}

/// Collections of rigid and soft bodies
#[derive(Debug, Default)]
pub struct PhysicsSpace {
    rigid_bodies: HandleMap<BodyId, PhysicsRigidBody>,
    soft_bodies: HandleMap<BodyId, PhysicsSoftBody>,
}

impl PhysicsSpace {
    /// Create an empty space
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rigid body
    pub fn add_rigid_body(&mut self, body: PhysicsRigidBody) -> BodyId {
        self.rigid_bodies.insert(body)
    }

    /// Remove a rigid body
    pub fn remove_rigid_body(&mut self, id: BodyId) -> Option<PhysicsRigidBody> {
        self.rigid_bodies.remove(id)
    }

    /// Mutable access to a rigid body
    pub fn rigid_body_mut(&mut self, id: BodyId) -> Option<&mut PhysicsRigidBody> {
        self.rigid_bodies.get_mut(id)
    }

    /// Add a soft body
    pub fn add_soft_body(&mut self, body: PhysicsSoftBody) -> BodyId {
        self.soft_bodies.insert(body)
    }

    /// Remove a soft body
    pub fn remove_soft_body(&mut self, id: BodyId) -> Option<PhysicsSoftBody> {
        self.soft_bodies.remove(id)
    }

    /// Mutable access to a soft body
    pub fn soft_body_mut(&mut self, id: BodyId) -> Option<&mut PhysicsSoftBody> {
        self.soft_bodies.get_mut(id)
    }

    /// Number of rigid bodies
    pub fn rigid_body_count(&self) -> usize {
        self.rigid_bodies.len()
    }

    /// Number of soft bodies
    pub fn soft_body_count(&self) -> usize {
        self.soft_bodies.len()
    }
}

impl PhysicsSpaceView for PhysicsSpace {
    type RigidBody = PhysicsRigidBody;
    type SoftBody = PhysicsSoftBody;

    fn rigid_body_ids(&self) -> Vec<BodyId> {
        self.rigid_bodies.keys().collect()
    }

    fn rigid_body(&self, id: BodyId) -> Option<&PhysicsRigidBody> {
        self.rigid_bodies.get(id)
    }

    fn soft_body_ids(&self) -> Vec<BodyId> {
        self.soft_bodies.keys().collect()
    }

    fn soft_body(&self, id: BodyId) -> Option<&PhysicsSoftBody> {
        self.soft_bodies.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_body_flags() {
        let shape = CollisionShape::cube(1.0).unwrap();
        let mut body = PhysicsRigidBody::new("box", shape, PhysicsRigidBody::MASS_FOR_STATIC);

        assert!(body.is_static());
        assert!(body.is_contact_response());
        assert!(!body.is_active());

        body.set_active(true);
        assert!(!body.is_active());
    }

    #[test]
    fn test_dynamic_body_flags() {
        let shape = CollisionShape::sphere(0.5).unwrap();
        let mut body = PhysicsRigidBody::new("ball", shape, 2.0);

        assert!(body.is_active());
        body.set_kinematic(true);
        body.set_contact_response(false);
        assert_eq!(body.flags(), BodyFlags::KINEMATIC | BodyFlags::ACTIVE);
    }

    #[test]
    fn test_cloth_topology() {
        let cloth = PhysicsSoftBody::cloth("cloth", 3, 4, 0.5, Vec3::zeros());

        assert_eq!(cloth.node_positions().len(), 12);
        // 3 rows * 3 horizontal + 2 * 4 vertical
        assert_eq!(cloth.links().len(), 17);
        assert_eq!(cloth.faces().len(), 12);
        assert_eq!(cloth.debug_num_sides(), 1);
    }

    #[test]
    fn test_space_add_remove() {
        let mut space = PhysicsSpace::new();
        let id = space.add_soft_body(PhysicsSoftBody::new("soft"));
        assert_eq!(space.soft_body_ids(), vec![id]);

        space.remove_soft_body(id);
        assert!(space.soft_body(id).is_none());
        assert!(space.soft_body_ids().is_empty());
    }
}
