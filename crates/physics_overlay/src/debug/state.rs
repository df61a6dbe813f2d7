//! Physics debug visualization state
//!
//! Owns the debug root node, the palette and both rosters. Call
//! [`PhysicsDebugState::update`] once per frame after the physics step.

use crate::config::OverlayConfig;
use crate::foundation::collections::{BodyId, NodeId};
use crate::physics::{PhysicsSpaceView, RigidBodyView};
use crate::render::{DebugMaterials, DebugShapeFactory, MaterialLibrary, WireframeShapeFactory};
use crate::scene::SceneTree;

use super::filter::DebugFilter;
use super::rigid_body_control::RigidBodyDebugControl;
use super::roster::Roster;
use super::soft_roster::SoftBodyRoster;
use super::DebugContext;

/// Scene node and control for one rigid body
#[derive(Debug)]
pub struct RigidBodyEntry {
    /// Node attached under the debug root, positioned like the body
    pub node: NodeId,
    /// Control keeping the node's geometry current
    pub control: RigidBodyDebugControl,
}

/// Debug visualization of an entire physics space
pub struct PhysicsDebugState {
    root: NodeId,
    materials: DebugMaterials,
    factory: Box<dyn DebugShapeFactory>,
    rigid: Roster<RigidBodyEntry>,
    soft: SoftBodyRoster,
    rigid_filter: Option<Box<dyn DebugFilter>>,
    soft_filter: Option<Box<dyn DebugFilter>>,
    cluster_filter: Option<Box<dyn DebugFilter>>,
}

impl std::fmt::Debug for PhysicsDebugState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsDebugState")
            .field("root", &self.root)
            .field("rigid", &self.rigid.len())
            .field("soft", &self.soft.len())
            .finish_non_exhaustive()
    }
}

impl PhysicsDebugState {
    /// Attach a debug root to the scene and register the palette
    pub fn new(scene: &mut SceneTree, library: &mut MaterialLibrary, config: &OverlayConfig) -> Self {
        let root = scene.create_node("physics debug");
        let scene_root = scene.root();
        scene.attach(scene_root, root);
        let materials = DebugMaterials::new(library, &config.colors, config.cluster_point_size);
        log::info!("Physics debug visualization enabled");

        Self {
            root,
            materials,
            factory: Box::new(WireframeShapeFactory::new()),
            rigid: Roster::new(),
            soft: SoftBodyRoster::new(),
            rigid_filter: None,
            soft_filter: None,
            cluster_filter: None,
        }
    }

    /// Use a different debug-mesh source
    pub fn with_factory(mut self, factory: impl DebugShapeFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// Restrict which rigid bodies are visualized
    pub fn set_rigid_filter(&mut self, filter: Option<Box<dyn DebugFilter>>) {
        self.rigid_filter = filter;
    }

    /// Restrict which soft bodies are visualized
    pub fn set_soft_filter(&mut self, filter: Option<Box<dyn DebugFilter>>) {
        self.soft_filter = filter;
    }

    /// Choose soft bodies whose clusters are drawn; `None` hides all clusters
    pub fn set_cluster_filter(&mut self, filter: Option<Box<dyn DebugFilter>>) {
        self.cluster_filter = filter;
    }

    /// Root node of all debug geometry
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Palette in use
    pub fn materials(&self) -> &DebugMaterials {
        &self.materials
    }

    /// Per-frame reconciliation and refresh
    pub fn update<P: PhysicsSpaceView>(&mut self, space: &P, scene: &mut SceneTree) {
        let mut ctx = DebugContext {
            scene,
            factory: self.factory.as_ref(),
            materials: &self.materials,
        };
        let root = self.root;

        let live = space.rigid_body_ids();
        let retired = self.rigid.reconcile(&live, self.rigid_filter.as_deref(), |id| {
            let body = space.rigid_body(id)?;
            let node = ctx.scene.create_node(body.name());
            ctx.scene.attach(root, node);
            let mut control = RigidBodyDebugControl::new(id, body, &mut ctx);
            control.set_spatial(ctx.scene, Some(node));
            log::debug!("Created debug node for rigid body '{}'", body.name());
            Some(RigidBodyEntry { node, control })
        });
        for (id, entry) in retired {
            log::debug!("Removed debug node for rigid body {:?}", id);
            ctx.scene.remove_subtree(entry.node);
        }
        for (id, entry) in self.rigid.iter_mut() {
            if let Some(body) = space.rigid_body(id) {
                entry.control.update(body, &mut ctx);
            }
        }

        self.soft.update(
            space,
            root,
            self.soft_filter.as_deref(),
            self.cluster_filter.as_deref(),
            &mut ctx,
        );
    }

    /// Node for a rigid body, if it is visualized
    pub fn rigid_node(&self, id: BodyId) -> Option<NodeId> {
        self.rigid.get(id).map(|entry| entry.node)
    }

    /// Control for a rigid body, if it is visualized
    pub fn rigid_control(&self, id: BodyId) -> Option<&RigidBodyDebugControl> {
        self.rigid.get(id).map(|entry| &entry.control)
    }

    /// Node for a soft body, if it is visualized
    pub fn soft_node(&self, id: BodyId) -> Option<NodeId> {
        self.soft.node(id)
    }

    /// Soft-body roster
    pub fn soft_roster(&self) -> &SoftBodyRoster {
        &self.soft
    }

    /// Number of visualized rigid bodies
    pub fn rigid_count(&self) -> usize {
        self.rigid.len()
    }

    /// Number of visualized soft bodies
    pub fn soft_count(&self) -> usize {
        self.soft.len()
    }

    /// Remove all debug geometry and the debug root from the scene
    pub fn detach(self, scene: &mut SceneTree) {
        let removed = scene.remove_subtree(self.root);
        log::info!("Physics debug visualization disabled ({} nodes removed)", removed);
    }
}
