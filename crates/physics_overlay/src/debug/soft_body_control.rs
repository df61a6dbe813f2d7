//! Debug visuals for one soft body
//!
//! Soft-body nodes move every frame, so the meshes are regenerated on each
//! update. Positions are already in physics space; the control's node keeps an
//! identity transform.

use std::sync::Arc;

use crate::foundation::collections::{BodyId, MaterialId, NodeId};
use crate::physics::SoftBodyView;
use crate::render::{DebugMesh, Topology};
use crate::scene::{Geometry, SceneTree};

use super::DebugContext;

/// Link, face, anchor and cluster geometry for a soft body
#[derive(Debug)]
pub struct SoftBodyDebugControl {
    body: BodyId,
    node: NodeId,
    links: NodeId,
    faces: NodeId,
    anchors: NodeId,
    clusters: Option<NodeId>,
}

impl SoftBodyDebugControl {
    /// Create the child geometry nodes under `node`
    pub fn new(body: BodyId, node: NodeId, ctx: &mut DebugContext<'_>) -> Self {
        let links = Self::create_part(ctx.scene, node, "links", Topology::Lines, ctx.materials.link);
        let faces = Self::create_part(
            ctx.scene,
            node,
            "faces",
            Topology::Triangles,
            ctx.materials.faces_single_sided,
        );
        let anchors = Self::create_part(ctx.scene, node, "anchors", Topology::Lines, ctx.materials.anchor);
        Self {
            body,
            node,
            links,
            faces,
            anchors,
            clusters: None,
        }
    }

    /// Body this control visualizes
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Node owning every part
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Link geometry node
    pub fn links(&self) -> NodeId {
        self.links
    }

    /// Face geometry node
    pub fn faces(&self) -> NodeId {
        self.faces
    }

    /// Anchor geometry node
    pub fn anchors(&self) -> NodeId {
        self.anchors
    }

    /// Cluster geometry node, present while clusters are shown
    pub fn clusters(&self) -> Option<NodeId> {
        self.clusters
    }

    /// Regenerate every part from the body's current state
    pub fn update<S: SoftBodyView + ?Sized>(&mut self, body: &S, show_clusters: bool, ctx: &mut DebugContext<'_>) {
        let positions = body.node_positions();

        let mut links = DebugMesh::new(Topology::Lines);
        links.positions.extend_from_slice(positions);
        links.indices.extend(body.links().iter().flatten().copied());
        Self::replace(ctx.scene, self.links, links, ctx.materials.link);

        let mut faces = DebugMesh::new(Topology::Triangles);
        faces.positions.extend_from_slice(positions);
        faces.indices.extend(body.faces().iter().flatten().copied());
        if body.debug_num_sides() > 0 {
            faces.generate_smooth_normals();
        }
        let face_material = ctx.materials.faces_for_sides(body.debug_num_sides());
        Self::replace(ctx.scene, self.faces, faces, face_material);

        let mut anchors = DebugMesh::new(Topology::Lines);
        for anchor in body.anchors() {
            if let Some(position) = positions.get(anchor.node as usize) {
                anchors.push_segment(*position, anchor.pivot);
            }
        }
        Self::replace(ctx.scene, self.anchors, anchors, ctx.materials.anchor);

        match (show_clusters, self.clusters) {
            (true, existing) => {
                let mut clusters = DebugMesh::new(Topology::Points);
                for center in body.cluster_centers() {
                    let index = clusters.push_vertex(center);
                    clusters.indices.push(index);
                }
                let node = existing.unwrap_or_else(|| {
                    Self::create_part(ctx.scene, self.node, "clusters", Topology::Points, ctx.materials.cluster)
                });
                Self::replace(ctx.scene, node, clusters, ctx.materials.cluster);
                self.clusters = Some(node);
            }
            (false, Some(node)) => {
                ctx.scene.remove_subtree(node);
                self.clusters = None;
            }
            (false, None) => {}
        }
    }

    fn create_part(
        scene: &mut SceneTree,
        parent: NodeId,
        name: &str,
        topology: Topology,
        material: MaterialId,
    ) -> NodeId {
        let geometry = Geometry::new(Arc::new(DebugMesh::new(topology))).with_material(material);
        let part = scene.create_geometry(name, geometry);
        scene.attach(parent, part);
        part
    }

    fn replace(scene: &mut SceneTree, part: NodeId, mesh: DebugMesh, material: MaterialId) {
        if let Some(node) = scene.node_mut(part) {
            node.geometry = Some(Geometry::new(Arc::new(mesh)).with_material(material));
        }
    }
}
