//! Scene hierarchy
//!
//! The overlay's side of the host scene graph: a tree of named nodes with
//! local transforms, some of which carry a debug mesh and a material. The
//! debug controls attach, detach and remove nodes here; a renderer walks the
//! tree from [`SceneTree::root`].

mod node;
mod tree;

pub use node::{Geometry, SceneNode};
pub use tree::SceneTree;
