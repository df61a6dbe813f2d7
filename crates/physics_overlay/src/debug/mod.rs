//! Debug visualization of physics bodies
//!
//! Per-frame glue between a physics space and the scene tree:
//! - [`RigidBodyDebugControl`] rebuilds a rigid body's mesh only when its shape
//!   parameters change, and picks its material from the body's state
//! - [`SoftBodyRoster`] keeps one node per live soft body
//! - [`PhysicsDebugState`] drives both for a whole space

pub mod filter;
pub mod rigid_body_control;
pub mod roster;
pub mod soft_body_control;
pub mod soft_roster;
pub mod state;

pub use filter::DebugFilter;
pub use rigid_body_control::{select_material, RigidBodyDebugControl, TrackedShapeState};
pub use soft_body_control::SoftBodyDebugControl;
pub use soft_roster::{SoftBodyEntry, SoftBodyRoster};
pub use state::{PhysicsDebugState, RigidBodyEntry};

use crate::render::{DebugMaterials, DebugShapeFactory};
use crate::scene::SceneTree;

/// Collaborators a debug control needs during one update
pub struct DebugContext<'a> {
    /// Scene the debug geometry lives in
    pub scene: &'a mut SceneTree,
    /// Source of rigid-body debug meshes
    pub factory: &'a dyn DebugShapeFactory,
    /// Palette
    pub materials: &'a DebugMaterials,
}
