//! Collision shapes for demo and test scenes
//!
//! Fixed compound recipes plus randomized hulls and tetrahedra.

pub mod points;
mod random;
mod recipes;

pub use random::{random_hull, random_tetrahedron, ShapeGenerator};
pub use recipes::{
    make_barbell, make_chair, make_knucklebone, make_ladder, make_top, make_tray, named_shapes,
    ChairShape,
};
