//! Randomized test shapes
//!
//! Generators draw values in a fixed order, so a seeded generator always
//! produces the same shape.

use rand::Rng;

use super::points;
use crate::foundation::math::points::{mean, scale, translate};
use crate::foundation::bounds::Aabb;
use crate::foundation::math::Vec3;
use crate::physics::{CollisionShape, ShapeResult};

/// Source of pseudo-random values for shape generation
pub trait ShapeGenerator {
    /// Uniform integer in `0..bound` (0 when `bound` is 0)
    fn next_int(&mut self, bound: u32) -> u32;

    /// Uniform float in `[0, 1)`
    fn next_float(&mut self) -> f32;

    /// Uniformly distributed direction
    fn next_unit_vector(&mut self) -> Vec3 {
        loop {
            let candidate = Vec3::new(
                2.0 * self.next_float() - 1.0,
                2.0 * self.next_float() - 1.0,
                2.0 * self.next_float() - 1.0,
            );
            let length_squared = candidate.norm_squared();
            if length_squared > 1e-4 && length_squared <= 1.0 {
                return candidate / length_squared.sqrt();
            }
        }
    }
}

impl<R: Rng + ?Sized> ShapeGenerator for R {
    fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            0
        } else {
            self.gen_range(0..bound)
        }
    }

    fn next_float(&mut self) -> f32 {
        self.gen()
    }
}

/// Centered convex hull with between 5 and 25 vertices
///
/// The vertex count picks the construction: 6 gives an octahedron, 12 an
/// icosahedron, other even counts below 15 a prism, counts above 20 a
/// spherical dome (181 vertices), and anything else the origin plus random
/// directions.
pub fn random_hull<G: ShapeGenerator + ?Sized>(generate: &mut G) -> ShapeResult<CollisionShape> {
    let num_vertices = 5 + generate.next_int(21);

    let points = if num_vertices == 6 {
        let radius = 0.7 + generate.next_float();
        points::octahedron(radius)
    } else if num_vertices == 12 {
        let radius = 0.6 + generate.next_float();
        points::icosahedron(radius)
    } else if num_vertices < 15 && num_vertices % 2 == 0 {
        let radius = 0.6 + 0.5 * generate.next_float();
        let height = 1.0 + generate.next_float();
        points::prism(num_vertices / 2, radius, height)
    } else if num_vertices > 20 {
        let radius = 0.7 + generate.next_float();
        let vertical_angle = 0.7 + 1.3 * generate.next_float();
        let mut dome = points::dome(20, 10, vertical_angle);
        scale(&mut dome, radius);
        if let Some(bounds) = Aabb::from_points(&dome) {
            translate(&mut dome, -bounds.center());
        }
        dome
    } else {
        let mut cloud = Vec::with_capacity(num_vertices as usize);
        cloud.push(Vec3::zeros());
        for _ in 1..num_vertices {
            cloud.push(generate.next_unit_vector() * 1.5);
        }
        let center = mean(&cloud);
        translate(&mut cloud, -center);
        cloud
    };

    log::trace!("Random hull: {} vertices requested, {} generated", num_vertices, points.len());
    CollisionShape::hull(points)
}

/// Tetrahedron with one vertex in each of four alternating octants
pub fn random_tetrahedron<G: ShapeGenerator + ?Sized>(generate: &mut G) -> ShapeResult<CollisionShape> {
    let r1 = 0.15 + generate.next_float();
    let r2 = 0.15 + generate.next_float();
    let r3 = 0.15 + generate.next_float();
    let r4 = 0.15 + generate.next_float();

    CollisionShape::simplex(vec![
        Vec3::new(r1, r1, r1),
        Vec3::new(r2, -r2, -r2),
        Vec3::new(-r3, -r3, r3),
        Vec3::new(-r4, r4, -r4),
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::physics::ShapeKind;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays fixed values, then repeats the fallbacks
    struct Scripted {
        ints: VecDeque<u32>,
        floats: VecDeque<f32>,
    }

    impl Scripted {
        fn new(ints: &[u32], floats: &[f32]) -> Self {
            Self {
                ints: ints.iter().copied().collect(),
                floats: floats.iter().copied().collect(),
            }
        }
    }

    impl ShapeGenerator for Scripted {
        fn next_int(&mut self, bound: u32) -> u32 {
            self.ints.pop_front().unwrap_or(0).min(bound.saturating_sub(1))
        }

        fn next_float(&mut self) -> f32 {
            self.floats.pop_front().unwrap_or(0.5)
        }
    }

    fn hull_points(shape: &CollisionShape) -> Vec<Vec3> {
        match shape.kind() {
            ShapeKind::Hull(hull) => hull.points().to_vec(),
            other => panic!("expected a hull, got {}", other.name()),
        }
    }

    #[test]
    fn test_six_vertices_make_octahedron() {
        let mut generate = Scripted::new(&[1], &[0.3]);
        let points = hull_points(&random_hull(&mut generate).unwrap());

        assert_eq!(points.len(), 6);
        for point in &points {
            assert_relative_eq!(point.norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_twelve_vertices_make_icosahedron() {
        let mut generate = Scripted::new(&[7], &[0.4]);
        let points = hull_points(&random_hull(&mut generate).unwrap());
        assert_eq!(points.len(), 12);
        assert_relative_eq!(points[0].norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_even_count_makes_prism() {
        let mut generate = Scripted::new(&[9], &[0.0, 0.5]);
        let points = hull_points(&random_hull(&mut generate).unwrap());

        assert_eq!(points.len(), 14);
        assert_relative_eq!(points[0].y, -0.75);
        assert_relative_eq!(Vec3::new(points[0].x, 0.0, points[0].z).norm(), 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_large_count_makes_centered_dome() {
        let mut generate = Scripted::new(&[20], &[0.3, 0.5]);
        let points = hull_points(&random_hull(&mut generate).unwrap());

        assert_eq!(points.len(), 181);
        let bounds = Aabb::from_points(&points).unwrap();
        assert_relative_eq!(bounds.center(), Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_other_counts_make_centered_cloud() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut generate = Scripted::new(&[2], &[]);
        // feed real random floats for the directions
        generate.floats = (0..600).map(|_| rng.gen::<f32>()).collect();
        let points = hull_points(&random_hull(&mut generate).unwrap());

        assert_eq!(points.len(), 7);
        assert_relative_eq!(mean(&points), Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_seeded_generator_is_repeatable() {
        let first = random_hull(&mut StdRng::seed_from_u64(42)).unwrap();
        let second = random_hull(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first.kind(), second.kind());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_tetrahedron_pattern() {
        let mut generate = Scripted::new(&[], &[0.0, 0.1, 0.2, 0.3]);
        let shape = random_tetrahedron(&mut generate).unwrap();
        let ShapeKind::Simplex(simplex) = shape.kind() else {
            panic!("expected a simplex");
        };

        let expected = [
            Vec3::new(0.15, 0.15, 0.15),
            Vec3::new(0.25, -0.25, -0.25),
            Vec3::new(-0.35, -0.35, 0.35),
            Vec3::new(-0.45, 0.45, -0.45),
        ];
        for (point, expected) in simplex.points().iter().zip(expected) {
            assert_relative_eq!(*point, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_unit_vectors_from_rng() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_relative_eq!(rng.next_unit_vector().norm(), 1.0, epsilon = 1e-5);
        }
        assert!(rng.next_int(21) < 21);
    }
}
