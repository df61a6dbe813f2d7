//! Wireframe debug meshes for collision shapes
//!
//! [`DebugShapeFactory`] is the seam between the overlay and whatever produces
//! debug geometry. [`WireframeShapeFactory`] is the built-in implementation: it
//! outlines each shape kind with line segments in the shape's model space.

use std::sync::Arc;

use crate::foundation::math::{constants::TAU, Axis, Vec3};
use crate::physics::shapes::{CollisionShape, ShapeKind};
use crate::physics::{DebugMeshNormals, DebugMeshResolution};

use super::debug_mesh::{DebugMesh, Topology};

/// Source of debug meshes for collision shapes
pub trait DebugShapeFactory {
    /// Build a fresh mesh for `shape`
    fn debug_mesh(
        &self,
        shape: &CollisionShape,
        normals: DebugMeshNormals,
        resolution: DebugMeshResolution,
    ) -> Arc<DebugMesh>;
}

/// Line-mesh outlines of collision shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireframeShapeFactory {
    low_segments: u32,
    high_segments: u32,
}

impl Default for WireframeShapeFactory {
    fn default() -> Self {
        Self {
            low_segments: 12,
            high_segments: 32,
        }
    }
}

impl WireframeShapeFactory {
    /// Create a factory with the default segment counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the number of segments used per full circle
    pub fn with_segments(mut self, low: u32, high: u32) -> Self {
        self.low_segments = low.max(3);
        self.high_segments = high.max(self.low_segments);
        self
    }

    /// Segments per full circle at the given resolution
    pub fn segments(&self, resolution: DebugMeshResolution) -> u32 {
        match resolution {
            DebugMeshResolution::Low => self.low_segments,
            DebugMeshResolution::High => self.high_segments,
        }
    }

    /// Build an outline of `shape` without normals
    pub fn outline(&self, shape: &CollisionShape, resolution: DebugMeshResolution) -> DebugMesh {
        let segments = self.segments(resolution);
        let mut mesh = DebugMesh::new(Topology::Lines);

        match shape.kind() {
            ShapeKind::Box(b) => push_box(&mut mesh, b.half_extents()),
            ShapeKind::Sphere(s) => push_sphere(&mut mesh, Vec3::zeros(), s.radius(), segments),
            ShapeKind::Cylinder(c) => {
                let half = c.axis().unit() * (c.height() / 2.0);
                push_circle(&mut mesh, half, c.axis(), c.radius(), segments);
                push_circle(&mut mesh, -half, c.axis(), c.radius(), segments);
                for side in rim_directions(c.axis()) {
                    mesh.push_segment(half + side * c.radius(), -half + side * c.radius());
                }
            }
            ShapeKind::Cone(c) => {
                let half = c.axis().unit() * (c.height() / 2.0);
                push_circle(&mut mesh, -half, c.axis(), c.radius(), segments);
                for side in rim_directions(c.axis()) {
                    mesh.push_segment(half, -half + side * c.radius());
                }
            }
            ShapeKind::Capsule(c) => push_capsule(&mut mesh, c.axis(), c.radius(), c.height(), segments),
            ShapeKind::MultiSphere(m) => {
                for center in m.sphere_centers() {
                    push_sphere(&mut mesh, center, m.radius(), segments);
                }
            }
            ShapeKind::Hull(h) => push_point_cloud(&mut mesh, h.points(), shape.margin()),
            ShapeKind::Simplex(s) => {
                let points = inflated(s.points(), shape.margin());
                for (i, a) in points.iter().enumerate() {
                    for b in &points[i + 1..] {
                        mesh.push_segment(*a, *b);
                    }
                }
            }
            ShapeKind::Compound(compound) => {
                for child in compound.children() {
                    let child_mesh = self.outline(&child.shape, resolution);
                    let transform = child.transform();
                    let first = mesh.positions.len() as u32;
                    mesh.positions
                        .extend(child_mesh.positions.iter().map(|p| transform.transform_point(p)));
                    mesh.indices.extend(child_mesh.indices.iter().map(|i| first + i));
                }
            }
        }

        let scale = shape.scale();
        if scale != Vec3::new(1.0, 1.0, 1.0) {
            for position in &mut mesh.positions {
                *position = position.component_mul(&scale);
            }
        }
        mesh
    }
}

impl DebugShapeFactory for WireframeShapeFactory {
    fn debug_mesh(
        &self,
        shape: &CollisionShape,
        normals: DebugMeshNormals,
        resolution: DebugMeshResolution,
    ) -> Arc<DebugMesh> {
        let mut mesh = self.outline(shape, resolution);
        match normals {
            DebugMeshNormals::None => {}
            DebugMeshNormals::Sphere => mesh.generate_sphere_normals(),
            DebugMeshNormals::Facet | DebugMeshNormals::Smooth => mesh.generate_smooth_normals(),
        }
        log::trace!(
            "Built {} debug mesh: {} vertices, {} segments",
            shape.kind().name(),
            mesh.vertex_count(),
            mesh.primitive_count()
        );
        Arc::new(mesh)
    }
}

fn push_box(mesh: &mut DebugMesh, half_extents: Vec3) {
    let h = half_extents;
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x * h.x, y * h.y, z * h.z);
    for &(sy, sz) in &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
        mesh.push_segment(corner(-1.0, sy, sz), corner(1.0, sy, sz));
    }
    for &(sx, sz) in &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
        mesh.push_segment(corner(sx, -1.0, sz), corner(sx, 1.0, sz));
    }
    for &(sx, sy) in &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
        mesh.push_segment(corner(sx, sy, -1.0), corner(sx, sy, 1.0));
    }
}

/// Points on a circle around `axis`, from angle `start` to `end`
fn arc(center: Vec3, axis: Axis, radius: f32, start: f32, end: f32, segments: u32) -> Vec<Vec3> {
    let (u, v) = axis.others();
    (0..=segments)
        .map(|i| {
            let angle = start + (end - start) * i as f32 / segments as f32;
            center + (u.unit() * angle.cos() + v.unit() * angle.sin()) * radius
        })
        .collect()
}

fn push_circle(mesh: &mut DebugMesh, center: Vec3, axis: Axis, radius: f32, segments: u32) {
    let mut points = arc(center, axis, radius, 0.0, TAU, segments);
    points.pop();
    mesh.push_loop(&points);
}

fn push_polyline(mesh: &mut DebugMesh, points: &[Vec3]) {
    for pair in points.windows(2) {
        mesh.push_segment(pair[0], pair[1]);
    }
}

fn push_sphere(mesh: &mut DebugMesh, center: Vec3, radius: f32, segments: u32) {
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        push_circle(mesh, center, axis, radius, segments);
    }
}

fn push_capsule(mesh: &mut DebugMesh, axis: Axis, radius: f32, height: f32, segments: u32) {
    let half = axis.unit() * (height / 2.0);
    push_circle(mesh, half, axis, radius, segments);
    push_circle(mesh, -half, axis, radius, segments);
    for side in rim_directions(axis) {
        mesh.push_segment(half + side * radius, -half + side * radius);
    }

    // half circles over each cap, in both planes containing the axis
    let (u, v) = axis.others();
    let half_segments = (segments / 2).max(2);
    for cap in [1.0_f32, -1.0] {
        let center = half * cap;
        let outward = axis.unit() * cap;
        for side in [u.unit(), v.unit()] {
            let points = (0..=half_segments)
                .map(|i| {
                    let angle = TAU / 2.0 * i as f32 / half_segments as f32;
                    center + (side * angle.cos() + outward * angle.sin()) * radius
                })
                .collect::<Vec<_>>();
            push_polyline(mesh, &points);
        }
    }
}

fn rim_directions(axis: Axis) -> [Vec3; 4] {
    let (u, v) = axis.others();
    [u.unit(), v.unit(), -u.unit(), -v.unit()]
}

/// Push each point outward from the centroid by `margin`
fn inflated(points: &[Vec3], margin: f32) -> Vec<Vec3> {
    let center = crate::foundation::math::points::mean(points);
    points
        .iter()
        .map(|p| {
            let offset = p - center;
            match offset.try_normalize(f32::EPSILON) {
                Some(direction) => p + direction * margin,
                None => *p,
            }
        })
        .collect()
}

/// Spokes from the centroid to every (inflated) hull vertex
fn push_point_cloud(mesh: &mut DebugMesh, points: &[Vec3], margin: f32) {
    let center = crate::foundation::math::points::mean(points);
    for point in inflated(points, margin) {
        mesh.push_segment(center, point);
    }
}
