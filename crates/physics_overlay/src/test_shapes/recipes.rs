//! Fixed compound shapes for demo scenes
//!
//! Children reuse the same shape (same identity) where the layout repeats a
//! part, except the chair, whose second front and rear legs are independent
//! copies.

use std::collections::BTreeMap;

use crate::foundation::math::{Axis, Vec3};
use crate::physics::{CollisionShape, CompoundShape, ShapeResult};

/// Chair shape plus the inverse inertia a dynamic body needs to tumble
/// correctly
#[derive(Debug, Clone)]
pub struct ChairShape {
    /// Compound re-expressed in its principal frame
    pub shape: CollisionShape,
    /// Inverse principal moments for a body of unit mass
    pub inverse_inertia: Vec3,
}

/// Bar along X with a cylindrical plate at each end
pub fn make_barbell() -> ShapeResult<CollisionShape> {
    let bar_radius = 0.2;
    let plate_offset = 2.0;
    let bar = CollisionShape::cylinder(bar_radius, 2.4 * plate_offset, Axis::X)?;

    let plate_radius = 1.0;
    let plate_thickness = 0.4;
    let plate = CollisionShape::cylinder(plate_radius, plate_thickness, Axis::X)?;

    let mut result = CompoundShape::new();
    result.add_child(bar);
    result.add_child_at(plate.clone(), Vec3::new(-plate_offset, 0.0, 0.0));
    result.add_child_at(plate, Vec3::new(plate_offset, 0.0, 0.0));
    Ok(CollisionShape::compound(result))
}

/// Asymmetrical chair with four cylindrical legs
///
/// Child masses are proportional to child volumes. The compound is shifted and
/// rotated onto its principal axes, and the returned inverse inertia must be
/// applied to any dynamic body using it.
pub fn make_chair() -> ShapeResult<ChairShape> {
    let leg_offset = 1.0;
    let leg_radius = 0.2;
    let seat_half = leg_offset + leg_radius;
    let seat = CollisionShape::multi_sphere(Vec3::new(seat_half, 0.2, seat_half))?;

    let front_length = 2.0;
    let front_leg = CollisionShape::cylinder(leg_radius, front_length, Axis::Y)?;
    let rear_length = 5.0;
    let rear_leg = CollisionShape::cylinder(leg_radius, rear_length, Axis::Y)?;

    let rear_half = rear_length / 2.0;
    let front_half = front_length / 2.0;
    let back_half = rear_half - front_half;
    let back = CollisionShape::multi_sphere(Vec3::new(leg_offset, back_half, leg_radius))?;

    let mut compound = CompoundShape::new();
    compound.add_child(seat);
    compound.add_child_at(front_leg.duplicate(), Vec3::new(leg_offset, -front_half, leg_offset));
    compound.add_child_at(front_leg, Vec3::new(-leg_offset, -front_half, leg_offset));
    let y_offset = rear_half - front_length;
    compound.add_child_at(rear_leg.duplicate(), Vec3::new(leg_offset, y_offset, -leg_offset));
    compound.add_child_at(rear_leg, Vec3::new(-leg_offset, y_offset, -leg_offset));
    compound.add_child_at(back, Vec3::new(0.0, back_half, -leg_offset));

    // masses must stay in child order
    let volumes = compound.list_volumes()?;
    let total: f32 = volumes.iter().sum();
    let masses: Vec<f32> = volumes.iter().map(|volume| volume / total).collect();

    let (principal, inertia) = compound.principal_axes(&masses)?;
    let inverse_inertia = inertia.map(|moment| 1.0 / moment);
    compound.correct_axes(&principal);
    log::debug!("Chair inverse inertia: {:?}", inverse_inertia);

    Ok(ChairShape {
        shape: CollisionShape::compound(compound),
        inverse_inertia,
    })
}

/// Three crossed capsules with balls on the X and Y tips
pub fn make_knucklebone() -> ShapeResult<CollisionShape> {
    let stem_length = 2.5;
    let stem_radius = 0.25;
    let x_stem = CollisionShape::capsule(stem_radius, stem_length, Axis::X)?;
    let y_stem = CollisionShape::capsule(stem_radius, stem_length, Axis::Y)?;
    let z_stem = CollisionShape::capsule(stem_radius, stem_length, Axis::Z)?;
    let ball = CollisionShape::sphere(0.4)?;

    let mut result = CompoundShape::new();
    result.add_child(x_stem);
    result.add_child(y_stem);
    result.add_child(z_stem);

    let stem_half = stem_length / 2.0;
    result.add_child_at(ball.clone(), Vec3::new(stem_half, 0.0, 0.0));
    result.add_child_at(ball.clone(), Vec3::new(-stem_half, 0.0, 0.0));
    result.add_child_at(ball.clone(), Vec3::new(0.0, stem_half, 0.0));
    result.add_child_at(ball, Vec3::new(0.0, -stem_half, 0.0));
    Ok(CollisionShape::compound(result))
}

/// Two box rails joined by five cylindrical rungs
pub fn make_ladder() -> ShapeResult<CollisionShape> {
    let rung_radius = 0.2;
    let rung_length = 2.0;
    let rung = CollisionShape::cylinder(rung_radius, rung_length, Axis::X)?;
    let rail = CollisionShape::box_shape(rung_radius, 6.0, rung_radius)?;

    let mut result = CompoundShape::new();
    let rung_spacing = 2.0;
    for step in [2.0, 1.0, 0.0, -1.0, -2.0] {
        result.add_child_at(rung.clone(), Vec3::new(0.0, step * rung_spacing, 0.0));
    }

    let rung_half = rung_length / 2.0;
    result.add_child_at(rail.clone(), Vec3::new(rung_half, 0.0, 0.0));
    result.add_child_at(rail, Vec3::new(-rung_half, 0.0, 0.0));
    Ok(CollisionShape::compound(result))
}

/// Spinning top: cylindrical body, conical tip, capsule handle
pub fn make_top() -> ShapeResult<CollisionShape> {
    let body_radius = 1.5;
    let body_height = 0.6;
    let body = CollisionShape::cylinder(body_radius, body_height, Axis::Y)?;

    let cone_height = 1.5;
    let cone = CollisionShape::cone(body_radius - 0.06, cone_height, Axis::Y)?;

    let handle_height = 1.5;
    let handle = CollisionShape::capsule(0.3, handle_height, Axis::Y)?;

    let mut result = CompoundShape::new();
    result.add_child(body);
    result.add_child_at(cone, Vec3::new(0.0, (cone_height + body_height) / 2.0, 0.0));
    result.add_child_at(handle, Vec3::new(0.0, -0.5 * (handle_height + body_height), 0.0));
    Ok(CollisionShape::compound(result))
}

/// Square tray with a tetrahedral deflector; meant for static bodies
pub fn make_tray() -> ShapeResult<CollisionShape> {
    let height = 1.5;
    let length = 15.0;
    let base = CollisionShape::box_shape(length, height, length)?;

    let mut result = CompoundShape::new();
    result.add_child_at(base, Vec3::new(0.0, -1.95 * height, 0.0));

    let size = 3.0_f32;
    let deflector = CollisionShape::simplex(vec![
        Vec3::new(0.0, size, 0.0),
        Vec3::new(-size, -height, size),
        Vec3::new(-size, -height, -size),
        Vec3::new(size * 2.0_f32.sqrt(), -height, 0.0),
    ])?;
    result.add_child(deflector);

    let offset = length - height;
    let bumper = CollisionShape::box_shape(length, height, height)?;
    result.add_child_at(bumper.clone(), Vec3::new(0.0, 0.0, offset));
    result.add_child_at(bumper, Vec3::new(0.0, 0.0, -offset));

    let bumper = CollisionShape::box_shape(height, height, length)?;
    result.add_child_at(bumper.clone(), Vec3::new(offset, 0.0, 0.0));
    result.add_child_at(bumper, Vec3::new(-offset, 0.0, 0.0));
    Ok(CollisionShape::compound(result))
}

/// Every fixed recipe, keyed by name
pub fn named_shapes() -> ShapeResult<BTreeMap<&'static str, CollisionShape>> {
    let mut shapes = BTreeMap::new();
    shapes.insert("barbell", make_barbell()?);
    shapes.insert("chair", make_chair()?.shape);
    shapes.insert("knucklebone", make_knucklebone()?);
    shapes.insert("ladder", make_ladder()?);
    shapes.insert("top", make_top()?);
    shapes.insert("tray", make_tray()?);
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn offsets(shape: &CollisionShape) -> Vec<Vec3> {
        shape
            .as_compound()
            .unwrap()
            .children()
            .iter()
            .map(|child| child.offset)
            .collect()
    }

    #[test]
    fn test_barbell_layout() {
        let barbell = make_barbell().unwrap();
        assert_eq!(
            offsets(&barbell),
            vec![Vec3::zeros(), Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)]
        );

        let children = barbell.as_compound().unwrap().children();
        assert_eq!(children[1].shape.id(), children[2].shape.id());
    }

    #[test]
    fn test_chair_principal_frame() {
        let chair = make_chair().unwrap();
        let compound = chair.shape.as_compound().unwrap();
        assert_eq!(compound.len(), 6);
        assert!(chair
            .inverse_inertia
            .iter()
            .all(|value| value.is_finite() && *value > 0.0));

        let volumes = compound.list_volumes().unwrap();
        let total: f32 = volumes.iter().sum();
        let center = compound
            .children()
            .iter()
            .zip(&volumes)
            .map(|(child, volume)| child.offset * (*volume / total))
            .sum::<Vec3>();
        assert_relative_eq!(center, Vec3::zeros(), epsilon = 1e-4);

        let legs: Vec<_> = compound.children()[1..5].iter().map(|c| c.shape.id()).collect();
        assert_ne!(legs[0], legs[1]);
        assert_ne!(legs[2], legs[3]);
    }

    #[test]
    fn test_knucklebone_children() {
        let knucklebone = make_knucklebone().unwrap();
        let offsets = offsets(&knucklebone);
        assert_eq!(offsets.len(), 7);
        assert_relative_eq!(offsets[3], Vec3::new(1.25, 0.0, 0.0));
        assert_relative_eq!(offsets[6], Vec3::new(0.0, -1.25, 0.0));
    }

    #[test]
    fn test_ladder_rungs_and_rails() {
        let ladder = make_ladder().unwrap();
        let offsets = offsets(&ladder);
        assert_eq!(offsets.len(), 7);
        let rung_heights: Vec<f32> = offsets[..5].iter().map(|o| o.y).collect();
        assert_eq!(rung_heights, vec![4.0, 2.0, 0.0, -2.0, -4.0]);
        assert_relative_eq!(offsets[5], Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(offsets[6], Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_top_stack() {
        let top = make_top().unwrap();
        let offsets = offsets(&top);
        assert_eq!(offsets.len(), 3);
        assert_relative_eq!(offsets[1].y, 1.05, epsilon = 1e-6);
        assert_relative_eq!(offsets[2].y, -1.05, epsilon = 1e-6);
    }

    #[test]
    fn test_tray_layout() {
        let tray = make_tray().unwrap();
        let offsets = offsets(&tray);
        assert_eq!(offsets.len(), 6);
        assert_relative_eq!(offsets[0].y, -2.925, epsilon = 1e-6);
        assert_relative_eq!(offsets[1], Vec3::zeros());
        assert_relative_eq!(offsets[2].z, 13.5);
        assert_relative_eq!(offsets[5].x, -13.5);
    }

    #[test]
    fn test_named_shapes() {
        let shapes = named_shapes().unwrap();
        let names: Vec<_> = shapes.keys().copied().collect();
        assert_eq!(names, vec!["barbell", "chair", "knucklebone", "ladder", "top", "tray"]);
        assert!(shapes.values().all(CollisionShape::is_compound));
    }
}
