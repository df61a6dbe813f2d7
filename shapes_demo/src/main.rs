//! Headless physics debug overlay demo
//!
//! Drops every test shape, a handful of random hulls and tetrahedra, a static
//! box and a cloth patch into an in-memory physics space, then runs a fixed
//! number of frames. Bodies are moved, reconfigured and removed along the way
//! so the debug overlay has something to rebuild and reconcile.
//!
//! Usage: `shapes_demo [config.toml|config.ron]`

use physics_overlay::config::{Config, ConfigError, OverlayConfig};
use physics_overlay::debug::PhysicsDebugState;
use physics_overlay::foundation::collections::BodyId;
use physics_overlay::foundation::logging;
use physics_overlay::foundation::math::{Quat, Vec3};
use physics_overlay::physics::{
    CollisionShape, PhysicsRigidBody, PhysicsSoftBody, PhysicsSpace, PhysicsSpaceView,
    RigidBodyView, ShapeError, SoftBodyView,
};
use physics_overlay::render::MaterialLibrary;
use physics_overlay::scene::SceneTree;
use physics_overlay::test_shapes::{make_chair, named_shapes, random_hull, random_tetrahedron};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Demo setup failures
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    /// Config file could not be loaded
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// A shape could not be built
    #[error("shape: {0}")]
    Shape(#[from] ShapeError),
}

/// Bodies the demo mutates on specific frames
#[derive(Default)]
struct Handles {
    static_box: Option<BodyId>,
    top: Option<BodyId>,
    ladder: Option<BodyId>,
    hulls: Vec<BodyId>,
    tetrahedra: Vec<BodyId>,
    cloth: Option<BodyId>,
}

/// Demo scene and the overlay watching it
pub struct ShapesDemo {
    config: OverlayConfig,
    scene: SceneTree,
    // kept alive for the palette registered by the debug state
    _library: MaterialLibrary,
    space: PhysicsSpace,
    debug: PhysicsDebugState,
    rng: StdRng,
    handles: Handles,
}

impl ShapesDemo {
    /// Create an empty scene with the overlay attached
    pub fn new(config: OverlayConfig) -> Self {
        let mut scene = SceneTree::new();
        let mut library = MaterialLibrary::new();
        let debug = PhysicsDebugState::new(&mut scene, &mut library, &config);
        let rng = StdRng::seed_from_u64(config.demo.seed);

        Self {
            config,
            scene,
            _library: library,
            space: PhysicsSpace::new(),
            debug,
            rng,
            handles: Handles::default(),
        }
    }

    /// Populate the physics space
    pub fn initialize(&mut self) -> Result<(), DemoError> {
        log::info!("Building demo scene...");

        let static_box = CollisionShape::cube(1.0)?;
        let static_box = self.add_rigid("box", static_box, PhysicsRigidBody::MASS_FOR_STATIC, Vec3::zeros());
        self.handles.static_box = Some(static_box);

        let chair = make_chair()?;
        let chair_id = self.add_rigid("chair", chair.shape, 1.0, Vec3::new(-28.0, 6.0, 0.0));
        if let Some(body) = self.space.rigid_body_mut(chair_id) {
            body.set_inverse_inertia(chair.inverse_inertia);
        }

        let mut x = -20.0;
        for (name, shape) in named_shapes()? {
            let id = match name {
                // added above with its inverse inertia
                "chair" => continue,
                "tray" => {
                    let below = Vec3::new(0.0, -10.0, 0.0);
                    self.add_rigid(name, shape, PhysicsRigidBody::MASS_FOR_STATIC, below)
                }
                _ => {
                    let position = Vec3::new(x, 6.0, 0.0);
                    x += 8.0;
                    self.add_rigid(name, shape, 1.0, position)
                }
            };
            match name {
                "top" => self.handles.top = Some(id),
                "ladder" => self.handles.ladder = Some(id),
                _ => {}
            }
        }

        for i in 0..self.config.demo.random_hulls {
            let shape = random_hull(&mut self.rng)?;
            let position = Vec3::new(i as f32 * 4.0, 12.0, 6.0);
            let id = self.add_rigid(&format!("hull {}", i), shape, 1.0, position);
            self.handles.hulls.push(id);
        }
        for i in 0..self.config.demo.random_tetrahedra {
            let shape = random_tetrahedron(&mut self.rng)?;
            let position = Vec3::new(i as f32 * 4.0, 12.0, -6.0);
            let id = self.add_rigid(&format!("tetrahedron {}", i), shape, 1.0, position);
            self.handles.tetrahedra.push(id);
        }

        let mut cloth = PhysicsSoftBody::cloth("cloth", 8, 8, 0.5, Vec3::new(0.0, 10.0, 12.0));
        let corner = cloth.node_positions().len().saturating_sub(1) as u32;
        cloth.add_anchor(0, Vec3::new(-1.75, 11.0, 10.25));
        cloth.add_anchor(corner, Vec3::new(1.75, 11.0, 13.75));
        cloth.set_cluster_centers(vec![Vec3::new(0.0, 10.0, 12.0)]);
        cloth.set_debug_num_sides(2);
        let cloth_id = self.space.add_soft_body(cloth);
        self.handles.cloth = Some(cloth_id);
        self.debug.set_cluster_filter(Some(Box::new(move |id: BodyId| id == cloth_id)));

        log::info!(
            "Scene ready: {} rigid bodies, {} soft bodies",
            self.space.rigid_body_count(),
            self.space.soft_body_count()
        );
        Ok(())
    }

    fn add_rigid(&mut self, name: &str, shape: CollisionShape, mass: f32, position: Vec3) -> BodyId {
        let mut body = PhysicsRigidBody::new(name, shape, mass).with_position(position);
        body.set_debug_mesh_resolution(self.config.default_resolution);
        body.set_debug_mesh_normals(self.config.default_normals);
        self.space.add_rigid_body(body)
    }

    /// Run the configured number of frames
    pub fn run(&mut self) -> Result<(), DemoError> {
        let frames = self.config.demo.frames;
        for frame in 0..frames {
            self.step(frame, frames)?;
            self.debug.update(&self.space, &mut self.scene);

            if frame % 30 == 0 {
                log::debug!(
                    "Frame {}: {} rigid, {} soft debug nodes, {} scene nodes",
                    frame,
                    self.debug.rigid_count(),
                    self.debug.soft_count(),
                    self.scene.len()
                );
            }
        }

        let geometry = self.scene.geometry_nodes(self.debug.root());
        let primitives: usize = geometry
            .iter()
            .filter_map(|&node| self.scene.mesh(node))
            .map(|mesh| mesh.primitive_count())
            .sum();
        log::info!(
            "Finished {} frames: {} rigid and {} soft bodies visualized, {} geometries, {} primitives",
            frames,
            self.debug.rigid_count(),
            self.debug.soft_count(),
            geometry.len(),
            primitives
        );
        Ok(())
    }

    /// Scripted changes for one frame
    fn step(&mut self, frame: u32, frames: u32) -> Result<(), DemoError> {
        let spin = Quat::from_axis_angle(&Vec3::y_axis(), frame as f32 * 0.05);
        for id in self.space.rigid_body_ids() {
            if let Some(body) = self.space.rigid_body_mut(id) {
                if body.is_static() || body.is_kinematic() {
                    continue;
                }
                let position = body.position();
                body.set_position(position - Vec3::new(0.0, 0.02, 0.0));
                body.set_rotation(spin);
            }
        }

        match frame {
            10 => {
                if let Some(body) = self.handles.static_box.and_then(|id| self.space.rigid_body_mut(id)) {
                    log::info!("Growing the margin of the static box");
                    body.collision_shape_mut().set_margin(0.2)?;
                }
            }
            20 => {
                for &id in &self.handles.tetrahedra {
                    if let Some(body) = self.space.rigid_body_mut(id) {
                        body.set_kinematic(true);
                    }
                }
            }
            30 => {
                for &id in &self.handles.hulls {
                    if let Some(body) = self.space.rigid_body_mut(id) {
                        body.set_active(false);
                    }
                }
            }
            40 => {
                if let Some(body) = self.handles.top.and_then(|id| self.space.rigid_body_mut(id)) {
                    body.set_contact_response(false);
                }
            }
            50 => {
                if let Some(body) = self.handles.ladder.and_then(|id| self.space.rigid_body_mut(id)) {
                    body.collision_shape_mut().set_scale(Vec3::new(1.0, 0.5, 1.0))?;
                }
            }
            _ => {}
        }

        if frame == frames / 2 {
            if let Some(id) = self.handles.hulls.first().copied() {
                log::info!("Removing the first random hull");
                self.space.remove_rigid_body(id);
            }
            if let Some(id) = self.handles.cloth.take() {
                log::info!("Removing the cloth");
                self.space.remove_soft_body(id);
            }
        } else if let Some(cloth) = self.handles.cloth.and_then(|id| self.space.soft_body_mut(id)) {
            cloth.translate(Vec3::new(0.0, -0.01, 0.0));
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => OverlayConfig::load_from_file(&path).map_err(DemoError::from)?,
        None => OverlayConfig::default(),
    };
    logging::init_with_level(&config.log_level);
    log::info!("Starting shapes demo (seed {})", config.demo.seed);

    let mut demo = ShapesDemo::new(config);
    demo.initialize()?;
    demo.run()?;
    Ok(())
}
