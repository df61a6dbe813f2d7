//! Primitive convex collision shapes
//!
//! Each primitive validates its dimensions on construction and knows its own
//! volume, bounds and unit-mass inertia in model space. Inertia follows the
//! usual engine conventions: exact formulas for boxes, spheres and cylinders,
//! and a box approximation over the local bounds for everything else.

use crate::foundation::bounds::Aabb;
use crate::foundation::math::{constants::PI, Axis, Vec3};
use crate::physics::error::{ShapeError, ShapeResult};

fn positive(shape: &'static str, parameter: &'static str, value: f32) -> ShapeResult<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::InvalidDimension { shape, parameter, value })
    }
}

fn non_negative(shape: &'static str, parameter: &'static str, value: f32) -> ShapeResult<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::InvalidDimension { shape, parameter, value })
    }
}

fn finite_points(shape: &'static str, points: &[Vec3]) -> ShapeResult<()> {
    match points.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
        Some(index) => Err(ShapeError::NonFinitePoint { shape, index }),
        None => Ok(()),
    }
}

/// Inertia of a solid box with the given half extents
pub fn box_inertia(mass: f32, half_extents: &Vec3) -> Vec3 {
    let lx = 2.0 * half_extents.x;
    let ly = 2.0 * half_extents.y;
    let lz = 2.0 * half_extents.z;
    Vec3::new(
        mass / 12.0 * (ly * ly + lz * lz),
        mass / 12.0 * (lx * lx + lz * lz),
        mass / 12.0 * (lx * lx + ly * ly),
    )
}

/// Extents of a shape that is round around `axis` with the given radius
fn axial_half_extents(axis: Axis, radius: f32, half_length: f32) -> Vec3 {
    let mut result = Vec3::repeat(radius);
    result[axis.index()] = half_length;
    result
}

/// Rectangular box given by its half extents
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    half_extents: Vec3,
}

impl BoxShape {
    /// Create a box from half extents
    pub fn new(half_extents: Vec3) -> ShapeResult<Self> {
        positive("box", "half extent x", half_extents.x)?;
        positive("box", "half extent y", half_extents.y)?;
        positive("box", "half extent z", half_extents.z)?;
        Ok(Self { half_extents })
    }

    /// Half extents
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Volume in model space
    pub fn volume(&self) -> f32 {
        8.0 * self.half_extents.x * self.half_extents.y * self.half_extents.z
    }

    /// Model-space bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(Vec3::zeros(), self.half_extents)
    }
}

/// Sphere centered on the origin
#[derive(Debug, Clone, PartialEq)]
pub struct SphereShape {
    radius: f32,
}

impl SphereShape {
    /// Create a sphere
    pub fn new(radius: f32) -> ShapeResult<Self> {
        Ok(Self { radius: positive("sphere", "radius", radius)? })
    }

    /// Radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Volume in model space
    pub fn volume(&self) -> f32 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    /// Model-space bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(self.radius))
    }
}

/// Right circular cylinder centered on the origin
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderShape {
    radius: f32,
    height: f32,
    axis: Axis,
}

impl CylinderShape {
    /// Create a cylinder with its height measured along `axis`
    pub fn new(radius: f32, height: f32, axis: Axis) -> ShapeResult<Self> {
        Ok(Self {
            radius: positive("cylinder", "radius", radius)?,
            height: positive("cylinder", "height", height)?,
            axis,
        })
    }

    /// Radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Total height
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Height axis
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Volume in model space
    pub fn volume(&self) -> f32 {
        PI * self.radius * self.radius * self.height
    }

    /// Model-space bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(
            Vec3::zeros(),
            axial_half_extents(self.axis, self.radius, self.height / 2.0),
        )
    }

    /// Inertia of a solid cylinder
    pub fn inertia(&self, mass: f32) -> Vec3 {
        let r2 = self.radius * self.radius;
        let perpendicular = mass * (3.0 * r2 + self.height * self.height) / 12.0;
        let mut result = Vec3::repeat(perpendicular);
        result[self.axis.index()] = mass * r2 / 2.0;
        result
    }
}

/// Cone whose base and apex sit at minus and plus half the height
#[derive(Debug, Clone, PartialEq)]
pub struct ConeShape {
    radius: f32,
    height: f32,
    axis: Axis,
}

impl ConeShape {
    /// Create a cone pointing along `axis`
    pub fn new(radius: f32, height: f32, axis: Axis) -> ShapeResult<Self> {
        Ok(Self {
            radius: positive("cone", "radius", radius)?,
            height: positive("cone", "height", height)?,
            axis,
        })
    }

    /// Base radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Height from base to apex
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Axis from base to apex
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Volume in model space
    pub fn volume(&self) -> f32 {
        PI * self.radius * self.radius * self.height / 3.0
    }

    /// Model-space bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(
            Vec3::zeros(),
            axial_half_extents(self.axis, self.radius, self.height / 2.0),
        )
    }
}

/// Capsule: a cylinder of `height` capped with hemispheres of `radius`
#[derive(Debug, Clone, PartialEq)]
pub struct CapsuleShape {
    radius: f32,
    height: f32,
    axis: Axis,
}

impl CapsuleShape {
    /// Create a capsule; `height` excludes the caps
    pub fn new(radius: f32, height: f32, axis: Axis) -> ShapeResult<Self> {
        Ok(Self {
            radius: positive("capsule", "radius", radius)?,
            height: non_negative("capsule", "height", height)?,
            axis,
        })
    }

    /// Cap radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Height of the cylindrical section
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Capsule axis
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Volume in model space
    pub fn volume(&self) -> f32 {
        let r2 = self.radius * self.radius;
        PI * r2 * self.height + 4.0 / 3.0 * PI * r2 * self.radius
    }

    /// Model-space bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(
            Vec3::zeros(),
            axial_half_extents(self.axis, self.radius, self.height / 2.0 + self.radius),
        )
    }
}

/// Equal-radius spheres placed at the corners of a core box
///
/// The convex hull is a rounded box. A core with one zero half extent gives
/// the four-sphere "swept rectangle" used for flat slabs.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSphereShape {
    core_half_extents: Vec3,
    radius: f32,
}

impl MultiSphereShape {
    /// Create from a core box and sphere radius
    pub fn new(core_half_extents: Vec3, radius: f32) -> ShapeResult<Self> {
        non_negative("multi-sphere", "core half extent x", core_half_extents.x)?;
        non_negative("multi-sphere", "core half extent y", core_half_extents.y)?;
        non_negative("multi-sphere", "core half extent z", core_half_extents.z)?;
        Ok(Self {
            core_half_extents,
            radius: positive("multi-sphere", "radius", radius)?,
        })
    }

    /// Approximate a rectangular solid
    ///
    /// The sphere radius equals the smallest half extent. The spheres sit in
    /// the plane perpendicular to that axis, so the shape matches the solid's
    /// extents exactly.
    pub fn from_rectangular_solid(half_extents: Vec3) -> ShapeResult<Self> {
        BoxShape::new(half_extents)?;
        let thin = half_extents.imin();
        let radius = half_extents[thin];
        let mut core = half_extents.add_scalar(-radius);
        core[thin] = 0.0;
        Self::new(core, radius)
    }

    /// Core box half extents
    pub fn core_half_extents(&self) -> Vec3 {
        self.core_half_extents
    }

    /// Radius shared by every sphere
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distinct sphere centers (corners of the core box)
    pub fn sphere_centers(&self) -> Vec<Vec3> {
        let core = Aabb::from_center_extents(Vec3::zeros(), self.core_half_extents);
        let mut centers: Vec<Vec3> = Vec::with_capacity(8);
        for corner in core.corners() {
            if !centers.contains(&corner) {
                centers.push(corner);
            }
        }
        centers
    }

    /// Volume of the rounded box (Steiner formula for a box swept by a sphere)
    pub fn volume(&self) -> f32 {
        let (a, b, c) = (
            self.core_half_extents.x,
            self.core_half_extents.y,
            self.core_half_extents.z,
        );
        let r = self.radius;
        8.0 * a * b * c
            + 8.0 * (a * b + b * c + c * a) * r
            + 2.0 * PI * (a + b + c) * r * r
            + 4.0 / 3.0 * PI * r * r * r
    }

    /// Model-space bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(Vec3::zeros(), self.core_half_extents.add_scalar(self.radius))
    }
}

/// Convex hull over an arbitrary point cloud
#[derive(Debug, Clone, PartialEq)]
pub struct HullShape {
    points: Vec<Vec3>,
}

impl HullShape {
    /// Create a hull; at least one point is required
    pub fn new(points: Vec<Vec3>) -> ShapeResult<Self> {
        if points.is_empty() {
            return Err(ShapeError::TooFewPoints { shape: "hull", min: 1, count: 0 });
        }
        finite_points("hull", &points)?;
        Ok(Self { points })
    }

    /// Hull vertices as supplied
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of hull vertices
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Model-space bounds
    pub fn aabb(&self) -> Aabb {
        // construction guarantees at least one point
        Aabb::from_points(&self.points)
            .unwrap_or_else(|| Aabb::new(Vec3::zeros(), Vec3::zeros()))
    }
}

/// Point, segment, triangle or tetrahedron
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexShape {
    points: Vec<Vec3>,
}

impl SimplexShape {
    /// Create a simplex from one to four points
    pub fn new(points: Vec<Vec3>) -> ShapeResult<Self> {
        match points.len() {
            0 => return Err(ShapeError::TooFewPoints { shape: "simplex", min: 1, count: 0 }),
            count if count > 4 => {
                return Err(ShapeError::TooManyPoints { shape: "simplex", max: 4, count })
            }
            _ => {}
        }
        finite_points("simplex", &points)?;
        Ok(Self { points })
    }

    /// Tetrahedron through four points
    pub fn tetrahedron(p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) -> ShapeResult<Self> {
        Self::new(vec![p1, p2, p3, p4])
    }

    /// Vertices
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Volume in model space (zero unless the simplex is a tetrahedron)
    pub fn volume(&self) -> f32 {
        if let [a, b, c, d] = self.points.as_slice() {
            ((b - a).dot(&(c - a).cross(&(d - a))) / 6.0).abs()
        } else {
            0.0
        }
    }

    /// Model-space bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.points)
            .unwrap_or_else(|| Aabb::new(Vec3::zeros(), Vec3::zeros()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        assert!(matches!(
            SphereShape::new(0.0),
            Err(ShapeError::InvalidDimension { shape: "sphere", .. })
        ));
        assert!(CylinderShape::new(1.0, f32::NAN, Axis::Y).is_err());
        assert!(BoxShape::new(Vec3::new(1.0, -1.0, 1.0)).is_err());
        assert!(CapsuleShape::new(0.5, 0.0, Axis::X).is_ok());
    }

    #[test]
    fn test_simplex_point_limits() {
        assert!(matches!(
            SimplexShape::new(Vec::new()),
            Err(ShapeError::TooFewPoints { .. })
        ));
        assert!(matches!(
            SimplexShape::new(vec![Vec3::zeros(); 5]),
            Err(ShapeError::TooManyPoints { count: 5, .. })
        ));
        assert!(matches!(
            HullShape::new(vec![Vec3::zeros(), Vec3::new(f32::INFINITY, 0.0, 0.0)]),
            Err(ShapeError::NonFinitePoint { index: 1, .. })
        ));
    }

    #[test]
    fn test_tetrahedron_volume() {
        let simplex = SimplexShape::tetrahedron(
            Vec3::zeros(),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
        )
        .unwrap();
        assert_relative_eq!(simplex.volume(), 1.0 / 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rectangular_solid_multi_sphere() {
        let slab = MultiSphereShape::from_rectangular_solid(Vec3::new(1.2, 0.2, 1.2)).unwrap();

        assert_relative_eq!(slab.radius(), 0.2);
        assert_relative_eq!(slab.core_half_extents(), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(slab.sphere_centers().len(), 4);
        assert_relative_eq!(slab.aabb().extents(), Vec3::new(1.2, 0.2, 1.2));

        // flat core: 2x2 square swept by r = 0.2
        let r: f32 = 0.2;
        let expected = 4.0 * 2.0 * r + 8.0 * PI * r * r / 2.0 + 4.0 / 3.0 * PI * r.powi(3);
        assert_relative_eq!(slab.volume(), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_cylinder_inertia_about_its_axis() {
        let cylinder = CylinderShape::new(1.0, 2.0, Axis::X).unwrap();
        let inertia = cylinder.inertia(2.0);

        assert_relative_eq!(inertia.x, 1.0);
        assert_relative_eq!(inertia.y, 2.0 * (3.0 + 4.0) / 12.0);
        assert_relative_eq!(inertia.y, inertia.z);
    }
}
