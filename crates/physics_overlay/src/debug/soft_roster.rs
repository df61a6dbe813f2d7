//! Soft-body debug roster
//!
//! Mirrors the physics space's live soft bodies with one scene node each. A
//! node lives exactly as long as its body is live and admitted by the filter.

use crate::foundation::collections::{BodyId, NodeId};
use crate::physics::{PhysicsSpaceView, SoftBodyView};

use super::filter::{admits, DebugFilter};
use super::roster::Roster;
use super::soft_body_control::SoftBodyDebugControl;
use super::DebugContext;

/// Scene node and control for one soft body
#[derive(Debug)]
pub struct SoftBodyEntry {
    /// Node attached under the debug root
    pub node: NodeId,
    /// Control regenerating the node's geometry
    pub control: SoftBodyDebugControl,
}

/// Registry of soft-body debug nodes
#[derive(Debug, Default)]
pub struct SoftBodyRoster {
    entries: Roster<SoftBodyEntry>,
}

impl SoftBodyRoster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile with the space's live soft bodies, then refresh their visuals
    ///
    /// New bodies get a node under `debug_root`; nodes of bodies that left
    /// the space or the filter are removed from the scene.
    pub fn update<P: PhysicsSpaceView>(
        &mut self,
        space: &P,
        debug_root: NodeId,
        filter: Option<&dyn DebugFilter>,
        cluster_filter: Option<&dyn DebugFilter>,
        ctx: &mut DebugContext<'_>,
    ) {
        let live = space.soft_body_ids();
        let retired = self.entries.reconcile(&live, filter, |id| {
            let body = space.soft_body(id)?;
            let node = ctx.scene.create_node(body.name());
            ctx.scene.attach(debug_root, node);
            let control = SoftBodyDebugControl::new(id, node, ctx);
            log::debug!("Created debug node for soft body '{}'", body.name());
            Some(SoftBodyEntry { node, control })
        });

        for (id, entry) in retired {
            log::debug!("Removed debug node for soft body {:?}", id);
            ctx.scene.remove_subtree(entry.node);
        }

        for (id, entry) in self.entries.iter_mut() {
            if let Some(body) = space.soft_body(id) {
                let show_clusters = cluster_filter.is_some() && admits(cluster_filter, id);
                entry.control.update(body, show_clusters, ctx);
            }
        }
    }

    /// Node for a soft body, if it is visualized
    pub fn node(&self, id: BodyId) -> Option<NodeId> {
        self.entries.get(id).map(|entry| entry.node)
    }

    /// Control for a soft body, if it is visualized
    pub fn control(&self, id: BodyId) -> Option<&SoftBodyDebugControl> {
        self.entries.get(id).map(|entry| &entry.control)
    }

    /// Number of visualized soft bodies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no soft body is visualized
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every node from the scene
    pub fn clear(&mut self, ctx: &mut DebugContext<'_>) {
        for (_, entry) in self.entries.drain() {
            ctx.scene.remove_subtree(entry.node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebugColors;
    use crate::foundation::math::Vec3;
    use crate::physics::{PhysicsSoftBody, PhysicsSpace};
    use crate::render::{DebugMaterials, MaterialLibrary, WireframeShapeFactory};
    use crate::scene::SceneTree;

    struct Fixture {
        scene: SceneTree,
        factory: WireframeShapeFactory,
        materials: DebugMaterials,
        root: NodeId,
        space: PhysicsSpace,
        roster: SoftBodyRoster,
    }

    impl Fixture {
        fn new() -> Self {
            let mut library = MaterialLibrary::new();
            let materials = DebugMaterials::new(&mut library, &DebugColors::default(), 1.0);
            let mut scene = SceneTree::new();
            let root = scene.create_node("debug");
            let scene_root = scene.root();
            scene.attach(scene_root, root);
            Self {
                scene,
                factory: WireframeShapeFactory::new(),
                materials,
                root,
                space: PhysicsSpace::new(),
                roster: SoftBodyRoster::new(),
            }
        }

        fn update(&mut self, filter: Option<&dyn DebugFilter>) {
            let mut ctx = DebugContext {
                scene: &mut self.scene,
                factory: &self.factory,
                materials: &self.materials,
            };
            self.roster.update(&self.space, self.root, filter, None, &mut ctx);
        }

        fn cloth(&mut self, name: &str) -> BodyId {
            self.space
                .add_soft_body(PhysicsSoftBody::cloth(name, 2, 2, 1.0, Vec3::zeros()))
        }
    }

    #[test]
    fn test_added_body_gains_one_node() {
        let mut fixture = Fixture::new();
        let id = fixture.cloth("a");
        fixture.update(None);

        let node = fixture.roster.node(id).unwrap();
        assert_eq!(fixture.scene.children(fixture.root), &[node]);
        assert_eq!(fixture.scene.node(node).unwrap().name, "a");

        fixture.update(None);
        assert_eq!(fixture.scene.children(fixture.root).len(), 1);
    }

    #[test]
    fn test_surviving_body_keeps_node() {
        let mut fixture = Fixture::new();
        let a = fixture.cloth("a");
        fixture.update(None);
        let node = fixture.roster.node(a).unwrap();

        fixture.cloth("b");
        fixture.update(None);
        assert_eq!(fixture.roster.node(a), Some(node));
        assert_eq!(fixture.roster.len(), 2);
    }

    #[test]
    fn test_removed_body_loses_node() {
        let mut fixture = Fixture::new();
        let a = fixture.cloth("a");
        let b = fixture.cloth("b");
        fixture.update(None);
        let node = fixture.roster.node(a).unwrap();

        fixture.space.remove_soft_body(a);
        fixture.update(None);

        assert!(fixture.roster.node(a).is_none());
        assert!(!fixture.scene.contains(node));
        assert!(fixture.roster.node(b).is_some());
        assert_eq!(fixture.scene.children(fixture.root).len(), 1);
    }

    #[test]
    fn test_filter_excludes_and_removes() {
        let mut fixture = Fixture::new();
        let a = fixture.cloth("a");
        let b = fixture.cloth("b");
        fixture.update(None);
        let node = fixture.roster.node(a).unwrap();

        let only_b = move |id: BodyId| id == b;
        fixture.update(Some(&only_b));

        assert!(!fixture.scene.contains(node));
        assert!(fixture.roster.node(a).is_none());
        assert!(fixture.roster.node(b).is_some());
    }

    #[test]
    fn test_clear_removes_all_nodes() {
        let mut fixture = Fixture::new();
        fixture.cloth("a");
        fixture.update(None);

        let mut ctx = DebugContext {
            scene: &mut fixture.scene,
            factory: &fixture.factory,
            materials: &fixture.materials,
        };
        fixture.roster.clear(&mut ctx);
        assert!(fixture.roster.is_empty());
        assert!(fixture.scene.children(fixture.root).is_empty());
    }
}
