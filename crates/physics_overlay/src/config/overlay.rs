//! Overlay and demo settings

use serde::{Deserialize, Serialize};

use super::Config;
use crate::foundation::math::Vec4;
use crate::physics::{DebugMeshNormals, DebugMeshResolution};

/// RGBA colors of the debug palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugColors {
    /// Static, kinematic or sleeping rigid bodies (blue)
    pub static_or_sleeping: Vec4,
    /// Dynamic, awake rigid bodies (magenta)
    pub dynamic_active: Vec4,
    /// Rigid bodies without contact response (yellow)
    pub no_contact_response: Vec4,
    /// Soft-body anchors (green)
    pub anchor: Vec4,
    /// Soft-body cluster centers (red)
    pub cluster: Vec4,
    /// Soft-body faces (red)
    pub faces: Vec4,
    /// Soft-body links (orange)
    pub link: Vec4,
}

impl Default for DebugColors {
    fn default() -> Self {
        Self {
            static_or_sleeping: Vec4::new(0.0, 0.0, 1.0, 1.0),
            dynamic_active: Vec4::new(1.0, 0.0, 1.0, 1.0),
            no_contact_response: Vec4::new(1.0, 1.0, 0.0, 1.0),
            anchor: Vec4::new(0.0, 1.0, 0.0, 1.0),
            cluster: Vec4::new(1.0, 0.0, 0.0, 1.0),
            faces: Vec4::new(1.0, 0.0, 0.0, 1.0),
            link: Vec4::new(1.0, 0.5, 0.0, 1.0),
        }
    }
}

/// Parameters of the headless demo scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of frames to run
    pub frames: u32,
    /// Seed for the random shape generators
    pub seed: u64,
    /// Number of random convex hulls to drop
    pub random_hulls: u32,
    /// Number of random tetrahedra to drop
    pub random_tetrahedra: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            seed: 1,
            random_hulls: 4,
            random_tetrahedra: 4,
        }
    }
}

/// Top-level overlay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Default `env_logger` filter; `RUST_LOG` still overrides it
    pub log_level: String,
    /// Debug palette
    pub colors: DebugColors,
    /// Size of cluster-center points, in pixels
    pub cluster_point_size: f32,
    /// Resolution assigned to new rigid bodies
    pub default_resolution: DebugMeshResolution,
    /// Normals assigned to new rigid bodies
    pub default_normals: DebugMeshNormals,
    /// Demo scene parameters
    pub demo: DemoConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            colors: DebugColors::default(),
            cluster_point_size: 3.0,
            default_resolution: DebugMeshResolution::Low,
            default_normals: DebugMeshNormals::None,
            demo: DemoConfig::default(),
        }
    }
}

impl OverlayConfig {
    /// Set the default log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the debug palette
    pub fn with_colors(mut self, colors: DebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Set the cluster point size
    pub fn with_cluster_point_size(mut self, size: f32) -> Self {
        self.cluster_point_size = size.max(1.0);
        self
    }

    /// Set the default debug-mesh resolution
    pub fn with_default_resolution(mut self, resolution: DebugMeshResolution) -> Self {
        self.default_resolution = resolution;
        self
    }

    /// Set the demo parameters
    pub fn with_demo(mut self, demo: DemoConfig) -> Self {
        self.demo = demo;
        self
    }
}

impl Config for OverlayConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_toml_round_trip() {
        let config = OverlayConfig::default()
            .with_default_resolution(DebugMeshResolution::High)
            .with_demo(DemoConfig {
                frames: 10,
                ..Default::default()
            });
        let text = config.to_string_as(ConfigFormat::Toml).unwrap();
        let parsed = OverlayConfig::from_str_as(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = OverlayConfig::default().with_cluster_point_size(5.0);
        let text = config.to_string_as(ConfigFormat::Ron).unwrap();
        let parsed = OverlayConfig::from_str_as(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = "log_level = \"trace\"\n\n[demo]\nseed = 42\n";
        let parsed = OverlayConfig::from_str_as(text, ConfigFormat::Toml).unwrap();

        assert_eq!(parsed.log_level, "trace");
        assert_eq!(parsed.demo.seed, 42);
        assert_eq!(parsed.demo.frames, DemoConfig::default().frames);
        assert_eq!(parsed.colors, DebugColors::default());
    }
}
