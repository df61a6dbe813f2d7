//! Debug mesh geometry
//!
//! A [`DebugMesh`] is plain, backend-agnostic vertex data generated only to
//! visualize physics state. Meshes are shared through `Arc`, so pointer
//! identity tells whether a mesh was regenerated.

use crate::foundation::bounds::Aabb;
use crate::foundation::math::Vec3;

/// How indices are grouped into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Index pairs
    Lines,
    /// Index triples
    Triangles,
    /// One index per point
    Points,
}

impl Topology {
    /// Number of indices per primitive
    pub const fn indices_per_primitive(self) -> usize {
        match self {
            Self::Lines => 2,
            Self::Triangles => 3,
            Self::Points => 1,
        }
    }
}

/// Renderable geometry for a debug visualization
#[derive(Debug, Clone, PartialEq)]
pub struct DebugMesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,

    /// Per-vertex normals, empty when the mesh carries none
    pub normals: Vec<Vec3>,

    /// Vertex indices grouped by `topology`
    pub indices: Vec<u32>,

    /// Primitive type
    pub topology: Topology,
}

impl DebugMesh {
    /// Create an empty mesh
    pub fn new(topology: Topology) -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, position: Vec3) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Append a line segment between two new vertices
    pub fn push_segment(&mut self, from: Vec3, to: Vec3) {
        let a = self.push_vertex(from);
        let b = self.push_vertex(to);
        self.indices.extend([a, b]);
    }

    /// Append a closed polyline through `points`
    pub fn push_loop(&mut self, points: &[Vec3]) {
        if points.len() < 2 {
            return;
        }
        let first = self.positions.len() as u32;
        self.positions.extend_from_slice(points);
        let count = points.len() as u32;
        for i in 0..count {
            self.indices.extend([first + i, first + (i + 1) % count]);
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of primitives
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.topology.indices_per_primitive()
    }

    /// Whether the mesh has no primitives
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Bounds of all vertices, if any
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Fill `normals` with directions away from the mesh's origin
    pub fn generate_sphere_normals(&mut self) {
        self.normals = self
            .positions
            .iter()
            .map(|p| p.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y))
            .collect();
    }

    /// Fill `normals` by averaging adjacent triangle normals
    ///
    /// Only triangle meshes have faces; other topologies fall back to sphere
    /// normals.
    pub fn generate_smooth_normals(&mut self) {
        if self.topology != Topology::Triangles {
            self.generate_sphere_normals();
            return;
        }
        let mut normals = vec![Vec3::zeros(); self.positions.len()];
        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let face = (self.positions[b] - self.positions[a]).cross(&(self.positions[c] - self.positions[a]));
            for index in [a, b, c] {
                normals[index] += face;
            }
        }
        self.normals = normals
            .into_iter()
            .map(|n| n.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_push_loop_closes() {
        let mut mesh = DebugMesh::new(Topology::Lines);
        mesh.push_loop(&[Vec3::x(), Vec3::y(), Vec3::z()]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.primitive_count(), 3);
        assert_eq!(&mesh.indices[4..], &[2, 0]);
    }

    #[test]
    fn test_bounds() {
        let mut mesh = DebugMesh::new(Topology::Lines);
        assert!(mesh.bounds().is_none());

        mesh.push_segment(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, -2.0, 0.0));
        let bounds = mesh.bounds().unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_relative_eq!(bounds.max, Vec3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn test_smooth_normals_of_flat_triangle() {
        let mut mesh = DebugMesh::new(Topology::Triangles);
        for p in [Vec3::zeros(), Vec3::x(), Vec3::z()] {
            mesh.push_vertex(p);
        }
        mesh.indices.extend([0, 2, 1]);
        mesh.generate_smooth_normals();

        for normal in &mesh.normals {
            assert_relative_eq!(*normal, Vec3::y(), epsilon = 1e-6);
        }
    }
}
