//! # Physics Overlay
//!
//! Debug visualization for physics bodies plus procedural collision shapes for
//! demo scenes.
//!
//! ## Features
//!
//! - **Rigid-body debug meshes**: rebuilt only when the shape changes, colored by body state
//! - **Soft-body roster**: one scene node per live soft body, reconciled every frame
//! - **Test shapes**: barbell, chair, knucklebone, ladder, top, tray, random hulls and tetrahedra
//! - **Configuration**: TOML or RON files for palette, logging and demo parameters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use physics_overlay::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OverlayConfig::default();
//!     let mut scene = SceneTree::new();
//!     let mut library = MaterialLibrary::new();
//!     let mut debug = PhysicsDebugState::new(&mut scene, &mut library, &config);
//!
//!     let mut space = PhysicsSpace::new();
//!     space.add_rigid_body(PhysicsRigidBody::new("barbell", make_barbell()?, 1.0));
//!
//!     // once per frame, after stepping physics
//!     debug.update(&space, &mut scene);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod config;
pub mod debug;
pub mod foundation;
pub mod physics;
pub mod render;
pub mod scene;
pub mod test_shapes;

/// Common imports for overlay users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, DebugColors, DemoConfig, OverlayConfig},
        debug::{DebugFilter, PhysicsDebugState},
        foundation::{
            collections::{BodyId, MaterialId, NodeId},
            math::{Axis, Quat, Transform, Vec3},
        },
        physics::{
            CollisionShape, CompoundShape, DebugMeshNormals, DebugMeshResolution,
            PhysicsRigidBody, PhysicsSoftBody, PhysicsSpace, PhysicsSpaceView, ShapeError,
        },
        render::{DebugMaterials, MaterialLibrary, WireframeShapeFactory},
        scene::SceneTree,
        test_shapes::{
            make_barbell, make_chair, make_knucklebone, make_ladder, make_top, make_tray,
            named_shapes, random_hull, random_tetrahedron, ShapeGenerator,
        },
    };
}
