//! Material system for debug rendering
//!
//! Materials live in a [`MaterialLibrary`] and are referenced by [`MaterialId`].
//! The overlay never looks materials up by name; the palette it draws with is
//! the explicitly constructed [`DebugMaterials`] set.

use crate::config::DebugColors;
use crate::foundation::collections::{HandleMap, MaterialId};
use crate::foundation::math::Vec4;

/// Which faces of a triangle mesh are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceCulling {
    /// Only front faces
    #[default]
    Back,
    /// Front and back faces
    None,
    /// Nothing is drawn
    All,
}

/// Material properties for debug rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Debug name
    pub name: String,

    /// Base color (RGBA)
    pub color: Vec4,

    /// Face culling mode
    pub culling: FaceCulling,

    /// Rendered size of point primitives, in pixels
    pub point_size: f32,

    /// Draw triangles as outlines
    pub wireframe: bool,
}

impl Material {
    /// Create a new opaque white material
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            culling: FaceCulling::default(),
            point_size: 1.0,
            wireframe: false,
        }
    }

    /// Set the base color
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color.map(|c| c.clamp(0.0, 1.0));
        self
    }

    /// Set the face culling mode
    pub fn with_culling(mut self, culling: FaceCulling) -> Self {
        self.culling = culling;
        self
    }

    /// Set the point size
    pub fn with_point_size(mut self, point_size: f32) -> Self {
        self.point_size = point_size.max(1.0);
        self
    }

    /// Draw triangles as outlines
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    /// Whether anything using this material is visible
    pub fn is_visible(&self) -> bool {
        self.culling != FaceCulling::All && self.color.w > 0.0
    }
}

/// Owner of every material the overlay can assign
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: HandleMap<MaterialId, Material>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material
    pub fn add(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    /// Look up a material
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Number of registered materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Palette used by the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugMaterials {
    /// Rigid bodies that are neither dynamic-and-awake nor non-responsive
    pub blue: MaterialId,
    /// Dynamic, awake rigid bodies
    pub magenta: MaterialId,
    /// Rigid bodies without contact response
    pub yellow: MaterialId,
    /// Soft-body anchor lines
    pub anchor: MaterialId,
    /// Soft-body cluster centers
    pub cluster: MaterialId,
    /// Soft-body faces that are hidden
    pub faces_invisible: MaterialId,
    /// Soft-body faces drawn from the front only
    pub faces_single_sided: MaterialId,
    /// Soft-body faces drawn from both sides
    pub faces_double_sided: MaterialId,
    /// Soft-body links
    pub link: MaterialId,
}

impl DebugMaterials {
    /// Register the palette in `library`
    pub fn new(library: &mut MaterialLibrary, colors: &DebugColors, cluster_point_size: f32) -> Self {
        let wire = |name: &str, color: Vec4| Material::new(name).with_color(color).with_wireframe(true);

        Self {
            blue: library.add(wire("debug blue", colors.static_or_sleeping)),
            magenta: library.add(wire("debug magenta", colors.dynamic_active)),
            yellow: library.add(wire("debug yellow", colors.no_contact_response)),
            anchor: library.add(Material::new("debug anchor").with_color(colors.anchor)),
            cluster: library.add(
                Material::new("debug cluster")
                    .with_color(colors.cluster)
                    .with_point_size(cluster_point_size),
            ),
            faces_invisible: library.add(
                Material::new("debug faces hidden")
                    .with_color(colors.faces)
                    .with_culling(FaceCulling::All),
            ),
            faces_single_sided: library.add(Material::new("debug faces").with_color(colors.faces)),
            faces_double_sided: library.add(
                Material::new("debug faces double-sided")
                    .with_color(colors.faces)
                    .with_culling(FaceCulling::None),
            ),
            link: library.add(Material::new("debug link").with_color(colors.link)),
        }
    }

    /// Face material for a soft body's side count (0, 1 or 2)
    pub fn faces_for_sides(&self, num_sides: u8) -> MaterialId {
        match num_sides {
            0 => self.faces_invisible,
            1 => self.faces_single_sided,
            _ => self.faces_double_sided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_palette_registration() {
        let mut library = MaterialLibrary::new();
        let colors = DebugColors::default();
        let palette = DebugMaterials::new(&mut library, &colors, 3.0);

        assert_eq!(library.len(), 9);
        let magenta = library.get(palette.magenta).unwrap();
        assert_relative_eq!(magenta.color, colors.dynamic_active);
        assert!(magenta.wireframe);
        assert_relative_eq!(library.get(palette.cluster).unwrap().point_size, 3.0);
    }

    #[test]
    fn test_face_material_by_side_count() {
        let mut library = MaterialLibrary::new();
        let palette = DebugMaterials::new(&mut library, &DebugColors::default(), 1.0);

        assert_eq!(palette.faces_for_sides(0), palette.faces_invisible);
        assert_eq!(palette.faces_for_sides(1), palette.faces_single_sided);
        assert_eq!(palette.faces_for_sides(2), palette.faces_double_sided);
        assert!(!library.get(palette.faces_invisible).unwrap().is_visible());
        assert_eq!(
            library.get(palette.faces_double_sided).unwrap().culling,
            FaceCulling::None
        );
    }

    #[test]
    fn test_material_builder_clamps() {
        let material = Material::new("test")
            .with_color(Vec4::new(2.0, -1.0, 0.5, 1.0))
            .with_point_size(0.0);
        assert_relative_eq!(material.color, Vec4::new(1.0, 0.0, 0.5, 1.0));
        assert_relative_eq!(material.point_size, 1.0);
    }
}
