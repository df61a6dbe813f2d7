//! # Debug Rendering Resources
//!
//! Backend-agnostic resources the overlay hands to a renderer:
//! - **Debug meshes**: plain vertex and index data, shared through `Arc`
//! - **Wireframe factory**: builds outline meshes for collision shapes
//! - **Materials**: a slot-map library plus the debug palette
//!
//! Nothing here talks to a graphics API; a host renderer reads scene nodes and
//! draws whatever geometry and materials they reference.

pub mod debug_mesh;
pub mod material;
pub mod wireframe;

pub use debug_mesh::{DebugMesh, Topology};
pub use material::{DebugMaterials, FaceCulling, Material, MaterialLibrary};
pub use wireframe::{DebugShapeFactory, WireframeShapeFactory};
