//! Vertex positions of simple convex solids
//!
//! Only positions are produced; they feed convex hulls, which need no
//! triangles or normals.

use crate::foundation::math::constants::{GOLDEN_RATIO, TAU};
use crate::foundation::math::Vec3;

/// Regular octahedron with its 6 vertices on the coordinate axes
pub fn octahedron(radius: f32) -> Vec<Vec3> {
    vec![
        Vec3::new(radius, 0.0, 0.0),
        Vec3::new(-radius, 0.0, 0.0),
        Vec3::new(0.0, radius, 0.0),
        Vec3::new(0.0, -radius, 0.0),
        Vec3::new(0.0, 0.0, radius),
        Vec3::new(0.0, 0.0, -radius),
    ]
}

/// Regular icosahedron with 12 vertices at distance `radius` from the origin
pub fn icosahedron(radius: f32) -> Vec<Vec3> {
    let phi = GOLDEN_RATIO;
    let mut result = Vec::with_capacity(12);
    for &a in &[-1.0_f32, 1.0] {
        for &b in &[-phi, phi] {
            result.push(Vec3::new(0.0, a, b));
            result.push(Vec3::new(a, b, 0.0));
            result.push(Vec3::new(b, 0.0, a));
        }
    }
    for point in &mut result {
        *point = point.normalize() * radius;
    }
    result
}

/// Right prism with a regular polygon cross-section, axis along Y
///
/// Produces `2 * num_sides` vertices: the bottom ring, then the top ring.
pub fn prism(num_sides: u32, radius: f32, height: f32) -> Vec<Vec3> {
    let half = height / 2.0;
    let mut result = Vec::with_capacity(2 * num_sides as usize);
    for y in [-half, half] {
        for side in 0..num_sides {
            let angle = TAU * side as f32 / num_sides as f32;
            result.push(Vec3::new(radius * angle.cos(), y, radius * angle.sin()));
        }
    }
    result
}

/// Unit-radius spherical dome with its apex on +Y
///
/// `vertical_angle` is the angle from the apex to the rim: `PI / 2` gives a
/// hemisphere, smaller angles a plano-convex lens. The apex is followed by
/// `quadrant_samples - 1` rings of `rim_samples` vertices, the last one being
/// the rim.
pub fn dome(rim_samples: u32, quadrant_samples: u32, vertical_angle: f32) -> Vec<Vec3> {
    let rings = quadrant_samples.saturating_sub(1);
    let mut result = Vec::with_capacity(1 + (rings * rim_samples) as usize);
    result.push(Vec3::y());
    for ring in 1..=rings {
        let polar = vertical_angle * ring as f32 / rings as f32;
        let (sin_polar, cos_polar) = polar.sin_cos();
        for sample in 0..rim_samples {
            let azimuth = TAU * sample as f32 / rim_samples as f32;
            result.push(Vec3::new(
                sin_polar * azimuth.cos(),
                cos_polar,
                sin_polar * azimuth.sin(),
            ));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use approx::assert_relative_eq;

    #[test]
    fn test_icosahedron_vertices_on_sphere() {
        let points = icosahedron(2.0);
        assert_eq!(points.len(), 12);
        for point in &points {
            assert_relative_eq!(point.norm(), 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_prism_rings() {
        let points = prism(5, 1.0, 3.0);
        assert_eq!(points.len(), 10);
        assert!(points[..5].iter().all(|p| p.y == -1.5));
        assert!(points[5..].iter().all(|p| p.y == 1.5));
    }

    #[test]
    fn test_dome_sample_count_and_rim() {
        let points = dome(20, 10, HALF_PI);
        assert_eq!(points.len(), 181);
        assert_relative_eq!(points[0], Vec3::y());
        for rim in &points[161..] {
            assert_relative_eq!(rim.y, 0.0, epsilon = 1e-6);
            assert_relative_eq!(rim.norm(), 1.0, epsilon = 1e-6);
        }
    }
}
