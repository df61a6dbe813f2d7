//! Node hierarchy backed by a slot map
//!
//! Nodes are created detached and attached explicitly. A node has at most one
//! parent; attaching it elsewhere moves it. Removing a node removes its whole
//! subtree, so no stale [`NodeId`] ever resolves to a recycled slot.

use std::sync::Arc;

use super::node::{Geometry, SceneNode};
use crate::foundation::collections::{HandleMap, MaterialId, NodeId};
use crate::foundation::math::Transform;
use crate::render::DebugMesh;

/// Scene hierarchy with a fixed root
#[derive(Debug)]
pub struct SceneTree {
    nodes: HandleMap<NodeId, SceneNode>,
    root: NodeId,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    /// Create a tree containing only the root
    pub fn new() -> Self {
        let mut nodes = HandleMap::with_key();
        let root = nodes.insert(SceneNode::new("root".to_string(), None));
        Self { nodes, root }
    }

    /// Root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached, empty node
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(SceneNode::new(name.into(), None))
    }

    /// Create a detached leaf node carrying geometry
    pub fn create_geometry(&mut self, name: impl Into<String>, geometry: Geometry) -> NodeId {
        self.nodes.insert(SceneNode::new(name.into(), Some(geometry)))
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Mutable access to a node
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root cannot be removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(SceneNode::parent)
    }

    /// Children of a node (empty for stale ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    /// Attach `child` under `parent`, moving it from any previous parent
    ///
    /// Returns `false` if either node is stale or the attachment would create
    /// a cycle.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) || self.is_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Detach a node from its parent; returns whether it was attached
    pub fn detach(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.nodes.get_mut(child).and_then(|node| node.parent.take()) else {
            return false;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        true
    }

    /// Detach and delete a node together with its descendants
    ///
    /// The root is never removed. Returns the number of nodes deleted.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        if id == self.root || !self.contains(id) {
            return 0;
        }
        self.detach(id);

        let mut pending = vec![id];
        let mut removed = 0;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Delete every descendant of `id`, keeping `id` itself
    pub fn clear_children(&mut self, id: NodeId) -> usize {
        let children = self.children(id).to_vec();
        children.into_iter().map(|child| self.remove_subtree(child)).sum()
    }

    /// Set a node's local transform
    pub fn set_local_transform(&mut self, id: NodeId, transform: Transform) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.local_transform = transform;
        }
    }

    /// Set the material of a geometry node
    pub fn set_material(&mut self, id: NodeId, material: MaterialId) {
        if let Some(geometry) = self.nodes.get_mut(id).and_then(|node| node.geometry.as_mut()) {
            geometry.material = Some(material);
        }
    }

    /// Mesh of a geometry node
    pub fn mesh(&self, id: NodeId) -> Option<&Arc<DebugMesh>> {
        self.nodes
            .get(id)
            .and_then(|node| node.geometry.as_ref())
            .map(|geometry| &geometry.mesh)
    }

    /// Material of a geometry node
    pub fn material(&self, id: NodeId) -> Option<MaterialId> {
        self.nodes
            .get(id)
            .and_then(|node| node.geometry.as_ref())
            .and_then(|geometry| geometry.material)
    }

    /// Compose local transforms from the root down to `id`
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.nodes.get(node_id)?;
            chain.push(&node.local_transform);
            current = node.parent;
        }
        Some(
            chain
                .into_iter()
                .rev()
                .fold(Transform::identity(), |acc, local| acc.combine(local)),
        )
    }

    /// Geometry nodes in the subtree under `id`, depth first
    pub fn geometry_nodes(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get(next) {
                if node.geometry.is_some() {
                    found.push(next);
                }
                pending.extend(node.children.iter().rev());
            }
        }
        found
    }

    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.parent(node_id);
        }
        false
    }
}
