//! Debug visuals for one rigid body
//!
//! The control caches the parameters its current mesh was built from and
//! rebuilds the mesh only when they change. Compound shapes are rebuilt every
//! frame because their children can change under an unchanged identity.

use crate::foundation::collections::{BodyId, MaterialId, NodeId};
use crate::foundation::math::{Transform, Vec3};
use crate::physics::{DebugMeshNormals, DebugMeshResolution, RigidBodyView, ShapeId};
use crate::render::DebugMaterials;
use crate::scene::{Geometry, SceneTree};

use super::DebugContext;

/// Parameters a debug mesh was generated from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedShapeState {
    /// Identity of the collision shape
    pub shape: ShapeId,
    /// Collision margin
    pub margin: f32,
    /// Normals option
    pub normals: DebugMeshNormals,
    /// Mesh resolution
    pub resolution: DebugMeshResolution,
    /// Shape scale
    pub scale: Vec3,
}

impl TrackedShapeState {
    /// Snapshot the body's current debug-relevant shape parameters
    pub fn capture<B: RigidBodyView + ?Sized>(body: &B) -> Self {
        let shape = body.collision_shape();
        Self {
            shape: shape.id(),
            margin: shape.margin(),
            normals: body.debug_mesh_normals(),
            resolution: body.debug_mesh_resolution(),
            scale: shape.scale(),
        }
    }

    /// Whether a mesh built from this snapshot is stale for `body`
    pub fn is_stale_for<B: RigidBodyView + ?Sized>(&self, body: &B) -> bool {
        body.collision_shape().is_compound() || *self != Self::capture(body)
    }
}

/// Material for a rigid body's debug geometry
///
/// An explicit override wins; otherwise non-responsive bodies are yellow,
/// dynamic awake bodies magenta, and everything else blue.
pub fn select_material<B: RigidBodyView + ?Sized>(body: &B, materials: &DebugMaterials) -> MaterialId {
    if let Some(material) = body.debug_material() {
        material
    } else if !body.is_contact_response() {
        materials.yellow
    } else if !body.is_kinematic() && body.is_active() {
        materials.magenta
    } else {
        materials.blue
    }
}

/// Keeps one rigid body's debug geometry in sync with the body
#[derive(Debug)]
pub struct RigidBodyDebugControl {
    body: BodyId,
    spatial: Option<NodeId>,
    geometry: NodeId,
    state: TrackedShapeState,
}

impl RigidBodyDebugControl {
    /// Build the initial mesh for `body`; the geometry starts detached
    pub fn new<B: RigidBodyView + ?Sized>(id: BodyId, body: &B, ctx: &mut DebugContext<'_>) -> Self {
        let state = TrackedShapeState::capture(body);
        let geometry = Self::build_geometry(body, ctx);
        Self {
            body: id,
            spatial: None,
            geometry,
            state,
        }
    }

    /// Body this control visualizes
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Node the geometry is attached to
    pub fn spatial(&self) -> Option<NodeId> {
        self.spatial
    }

    /// Current geometry node
    pub fn geometry(&self) -> NodeId {
        self.geometry
    }

    /// Parameters of the current mesh
    pub fn state(&self) -> &TrackedShapeState {
        &self.state
    }

    /// Attach the geometry to `spatial`, or detach it when `None`
    pub fn set_spatial(&mut self, scene: &mut SceneTree, spatial: Option<NodeId>) {
        if spatial == self.spatial {
            return;
        }
        match spatial {
            Some(node) => {
                scene.attach(node, self.geometry);
            }
            None => {
                scene.detach(self.geometry);
            }
        }
        self.spatial = spatial;
    }

    /// Per-frame refresh; returns whether the mesh was rebuilt
    ///
    /// Rebuilds the mesh when stale, then reassigns the material and copies
    /// the body's location and orientation onto the spatial.
    pub fn update<B: RigidBodyView + ?Sized>(&mut self, body: &B, ctx: &mut DebugContext<'_>) -> bool {
        let rebuilt = self.state.is_stale_for(body);
        if rebuilt {
            log::trace!("Rebuilding debug mesh for rigid body '{}'", body.name());
            ctx.scene.remove_subtree(self.geometry);
            self.geometry = Self::build_geometry(body, ctx);
            if let Some(spatial) = self.spatial {
                ctx.scene.attach(spatial, self.geometry);
            }
            self.state = TrackedShapeState::capture(body);
        }

        ctx.scene.set_material(self.geometry, select_material(body, ctx.materials));
        if let Some(spatial) = self.spatial {
            ctx.scene.set_local_transform(
                spatial,
                Transform::from_position_rotation(body.position(), body.rotation()),
            );
        }
        rebuilt
    }

    /// Delete the geometry node
    pub fn remove(self, scene: &mut SceneTree) {
        scene.remove_subtree(self.geometry);
    }

    fn build_geometry<B: RigidBodyView + ?Sized>(body: &B, ctx: &mut DebugContext<'_>) -> NodeId {
        let mesh = ctx.factory.debug_mesh(
            body.collision_shape(),
            body.debug_mesh_normals(),
            body.debug_mesh_resolution(),
        );
        let geometry = Geometry::new(mesh).with_material(select_material(body, ctx.materials));
        ctx.scene.create_geometry(body.name(), geometry)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::foundation::math::Quat;
    use crate::physics::{CollisionShape, CompoundShape, PhysicsRigidBody};
    use crate::render::{MaterialLibrary, WireframeShapeFactory};
    use crate::config::DebugColors;
    use crate::foundation::collections::HandleMap;
    use approx::assert_relative_eq;

    struct Fixture {
        scene: SceneTree,
        factory: WireframeShapeFactory,
        materials: DebugMaterials,
        id: BodyId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut library = MaterialLibrary::new();
            let materials = DebugMaterials::new(&mut library, &DebugColors::default(), 1.0);
            let mut ids: HandleMap<BodyId, ()> = HandleMap::with_key();
            Self {
                scene: SceneTree::new(),
                factory: WireframeShapeFactory::new(),
                materials,
                id: ids.insert(()),
            }
        }

        fn ctx(&mut self) -> DebugContext<'_> {
            DebugContext {
                scene: &mut self.scene,
                factory: &self.factory,
                materials: &self.materials,
            }
        }

        fn control(&mut self, body: &PhysicsRigidBody) -> RigidBodyDebugControl {
            let id = self.id;
            let spatial = self.scene.create_node("spatial");
            let root = self.scene.root();
            self.scene.attach(root, spatial);
            let mut control = RigidBodyDebugControl::new(id, body, &mut self.ctx());
            control.set_spatial(&mut self.scene, Some(spatial));
            control
        }

        fn mesh(&self, control: &RigidBodyDebugControl) -> Arc<crate::render::DebugMesh> {
            self.scene.mesh(control.geometry()).cloned().unwrap()
        }
    }

    fn ball() -> PhysicsRigidBody {
        PhysicsRigidBody::new("ball", CollisionShape::sphere(0.5).unwrap(), 1.0)
    }

    #[test]
    fn test_unchanged_body_keeps_mesh() {
        let mut fixture = Fixture::new();
        let body = ball();
        let mut control = fixture.control(&body);
        let before = fixture.mesh(&control);

        assert!(!control.update(&body, &mut fixture.ctx()));
        assert!(!control.update(&body, &mut fixture.ctx()));
        assert!(Arc::ptr_eq(&before, &fixture.mesh(&control)));
    }

    #[test]
    fn test_each_tracked_parameter_forces_rebuild() {
        let mut fixture = Fixture::new();
        let mut body = ball();
        let mut control = fixture.control(&body);

        body.collision_shape_mut().set_margin(0.2).unwrap();
        assert!(control.update(&body, &mut fixture.ctx()));

        body.collision_shape_mut().set_scale(Vec3::new(2.0, 2.0, 2.0)).unwrap();
        assert!(control.update(&body, &mut fixture.ctx()));

        body.set_debug_mesh_normals(DebugMeshNormals::Smooth);
        assert!(control.update(&body, &mut fixture.ctx()));

        body.set_debug_mesh_resolution(DebugMeshResolution::High);
        assert!(control.update(&body, &mut fixture.ctx()));

        let replacement = body.collision_shape().duplicate();
        body.set_collision_shape(replacement);
        assert!(control.update(&body, &mut fixture.ctx()));

        assert!(!control.update(&body, &mut fixture.ctx()));
        assert_eq!(*control.state(), TrackedShapeState::capture(&body));
    }

    #[test]
    fn test_compound_rebuilds_every_frame() {
        let mut fixture = Fixture::new();
        let mut compound = CompoundShape::new();
        compound.add_child(CollisionShape::cube(1.0).unwrap());
        let body = PhysicsRigidBody::new("crate", CollisionShape::compound(compound), 1.0);
        let mut control = fixture.control(&body);

        let first = fixture.mesh(&control);
        assert!(control.update(&body, &mut fixture.ctx()));
        let second = fixture.mesh(&control);
        assert!(control.update(&body, &mut fixture.ctx()));

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&second, &fixture.mesh(&control)));
    }

    #[test]
    fn test_compound_child_added_in_place_is_drawn() {
        let mut fixture = Fixture::new();
        let mut compound = CompoundShape::new();
        compound.add_child(CollisionShape::cube(1.0).unwrap());
        let mut body = PhysicsRigidBody::new("crate", CollisionShape::compound(compound), 1.0);
        let mut control = fixture.control(&body);
        let id = body.collision_shape().id();
        let before = fixture.mesh(&control);

        body.collision_shape_mut()
            .as_compound_mut()
            .unwrap()
            .add_child_at(CollisionShape::cube(1.0).unwrap(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(body.collision_shape().id(), id);
        assert!(control.update(&body, &mut fixture.ctx()));

        let after = fixture.mesh(&control);
        assert!(after.primitive_count() > before.primitive_count());
        let (before, after) = (before.bounds().unwrap(), after.bounds().unwrap());
        assert!(after.max.x > before.max.x + 5.0);
    }

    #[test]
    fn test_replaced_kind_forces_rebuild() {
        let mut fixture = Fixture::new();
        let mut body = ball();
        let mut control = fixture.control(&body);
        let sphere_mesh = fixture.mesh(&control);

        let cube = CollisionShape::cube(5.0).unwrap();
        body.collision_shape_mut().set_kind(cube.kind().clone());
        assert!(control.update(&body, &mut fixture.ctx()));

        let cube_mesh = fixture.mesh(&control);
        assert!(!Arc::ptr_eq(&sphere_mesh, &cube_mesh));
        assert!(cube_mesh.bounds().unwrap().max.x > sphere_mesh.bounds().unwrap().max.x);
    }

    #[test]
    fn test_rebuild_replaces_geometry_under_spatial() {
        let mut fixture = Fixture::new();
        let mut body = ball();
        let mut control = fixture.control(&body);
        let spatial = control.spatial().unwrap();
        let old_geometry = control.geometry();

        body.collision_shape_mut().set_margin(0.3).unwrap();
        control.update(&body, &mut fixture.ctx());

        assert!(!fixture.scene.contains(old_geometry));
        assert_eq!(fixture.scene.children(spatial), &[control.geometry()]);
        assert_eq!(fixture.scene.node(control.geometry()).unwrap().name, "ball");
    }

    #[test]
    fn test_material_selection() {
        let fixture = Fixture::new();
        let palette = fixture.materials;
        let mut body = ball();

        assert_eq!(select_material(&body, &palette), palette.magenta);

        body.set_kinematic(true);
        assert_eq!(select_material(&body, &palette), palette.blue);

        body.set_kinematic(false);
        body.set_active(false);
        assert_eq!(select_material(&body, &palette), palette.blue);

        body.set_contact_response(false);
        assert_eq!(select_material(&body, &palette), palette.yellow);

        body.set_debug_material(Some(palette.link));
        assert_eq!(select_material(&body, &palette), palette.link);

        let wall = PhysicsRigidBody::new("wall", CollisionShape::cube(1.0).unwrap(), 0.0);
        assert_eq!(select_material(&wall, &palette), palette.blue);
    }

    #[test]
    fn test_update_tracks_state_and_transform() {
        let mut fixture = Fixture::new();
        let mut body = ball();
        let mut control = fixture.control(&body);

        body.set_position(Vec3::new(1.0, 2.0, 3.0));
        body.set_rotation(Quat::from_axis_angle(&Vec3::z_axis(), 0.5));
        body.set_contact_response(false);
        control.update(&body, &mut fixture.ctx());

        let spatial = control.spatial().unwrap();
        let transform = &fixture.scene.node(spatial).unwrap().local_transform;
        assert_relative_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(transform.rotation.angle(), 0.5, epsilon = 1e-6);
        assert_eq!(fixture.scene.material(control.geometry()), Some(fixture.materials.yellow));
    }

    #[test]
    fn test_set_spatial_none_detaches() {
        let mut fixture = Fixture::new();
        let body = ball();
        let mut control = fixture.control(&body);
        let spatial = control.spatial().unwrap();

        control.set_spatial(&mut fixture.scene, None);
        assert!(fixture.scene.children(spatial).is_empty());
        assert_eq!(fixture.scene.parent(control.geometry()), None);
    }
}
