//! Scene node data

use std::sync::Arc;

use crate::foundation::collections::{MaterialId, NodeId};
use crate::foundation::math::Transform;
use crate::render::DebugMesh;

/// Drawable payload of a leaf node
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Shared mesh; pointer identity changes only when the mesh is rebuilt
    pub mesh: Arc<DebugMesh>,

    /// Material used to draw the mesh
    pub material: Option<MaterialId>,
}

impl Geometry {
    /// Create geometry without a material
    pub fn new(mesh: Arc<DebugMesh>) -> Self {
        Self { mesh, material: None }
    }

    /// Set the material (builder style)
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }
}

/// A node in a [`SceneTree`](super::SceneTree)
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Debug name
    pub name: String,

    /// Transform relative to the parent
    pub local_transform: Transform,

    /// Optional drawable payload
    pub geometry: Option<Geometry>,

    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl SceneNode {
    pub(super) fn new(name: String, geometry: Option<Geometry>) -> Self {
        Self {
            name,
            local_transform: Transform::identity(),
            geometry,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attachment order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
