//! The assembled scene layer: camera sway, hover lifts and particle drift
//! advanced together by one `tick`.
//!
//! ```
//! use vista::*;
//!
//! let hub = PointerHub::new();
//! hub.set_viewport(Vec2::new(1280.0, 720.0));
//!
//! let mut showcase = Showcase::new(ShowcaseConfig::default(), &hub).unwrap();
//! hub.pointer_moved(Vec2::new(1100.0, 360.0));
//! for _ in 0..60 {
//!     showcase.tick(1.0 / 60.0);
//! }
//! assert!(showcase.rig().look_offset().unwrap().x > 0.0);
//!
//! showcase.dispose();
//! assert_eq!(hub.listener_count(), 0);
//! ```

use glam::{Mat4, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::camera::Camera;
use crate::camera_rig::{DampedCameraRig, RigError};
use crate::config::{ConfigError, ShowcaseConfig};
use crate::ecs::{self, DisplaceablePart, HEROES, HeroObject};
use crate::hover::HoverLiftAnimator;
use crate::input::PointerHub;
use crate::particles::{self, ParticleDriftField};
use crate::picking::{self, HoverEvent, HoverTracker, Ray};
use crate::transform::Transform;

/// Errors building a [`Showcase`].
#[derive(Debug)]
pub enum ShowcaseError {
    Config(ConfigError),
    Rig(RigError),
}

impl std::fmt::Display for ShowcaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShowcaseError::Config(e) => write!(f, "Invalid showcase config: {}", e),
            ShowcaseError::Rig(e) => write!(f, "Camera rig setup failed: {}", e),
        }
    }
}

impl std::error::Error for ShowcaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShowcaseError::Config(e) => Some(e),
            ShowcaseError::Rig(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ShowcaseError {
    fn from(e: ConfigError) -> Self {
        ShowcaseError::Config(e)
    }
}

impl From<RigError> for ShowcaseError {
    fn from(e: RigError) -> Self {
        ShowcaseError::Rig(e)
    }
}

/// Camera, hero objects and particles for one showcase scene.
pub struct Showcase {
    config: ShowcaseConfig,
    hub: PointerHub,
    camera: Camera,
    rig: DampedCameraRig,
    world: hecs::World,
    heroes: Vec<hecs::Entity>,
    focal_points: Vec<Vec3>,
    particles: ParticleDriftField,
    tracker: HoverTracker,
    disposed: bool,
}

impl Showcase {
    /// Validate `config`, spawn the hero objects, scatter the particles and
    /// attach the camera rig to pointer input from `hub`.
    pub fn new(config: ShowcaseConfig, hub: &PointerHub) -> Result<Self, ShowcaseError> {
        config.validate()?;

        let mut world = hecs::World::new();
        let heroes = HEROES
            .iter()
            .map(|hero| hero.spawn(&mut world, config.lift))
            .collect::<Result<Vec<_>, _>>()?;
        let focal_points: Vec<Vec3> = HEROES.iter().map(|hero| hero.position).collect();

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let particles = ParticleDriftField::new(&config.drift, &focal_points, &mut rng)?;

        let mut camera = Camera::new();
        let mut rig = DampedCameraRig::new(config.rig, hub)?;
        rig.attach(&mut camera, &config.placement)?;

        log::info!(
            "showcase ready: {} heroes, {} particles",
            heroes.len(),
            particles.len()
        );

        Ok(Self {
            config,
            hub: hub.clone(),
            camera,
            rig,
            world,
            heroes,
            focal_points,
            particles,
            tracker: HoverTracker::new(),
            disposed: false,
        })
    }

    /// Advance the scene by `dt` seconds.
    ///
    /// Picking runs first so hover changes from this frame's cursor start
    /// their tweens this frame. Negative or non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f32) {
        if self.disposed {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.config.picking {
            self.pick();
        }
        ecs::advance_hover_lifts(&mut self.world, dt);
        self.rig.update(&mut self.camera, dt);
        self.particles.update(dt);
    }

    fn pick(&mut self) {
        let hit = self
            .hub
            .cursor()
            .and_then(|cursor| Ray::from_camera(&self.camera, cursor, self.hub.viewport()))
            .and_then(|ray| picking::raycast(&self.world, &ray))
            .map(|hit| hit.entity);

        for event in self.tracker.update(hit) {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: HoverEvent) -> bool {
        let (entity, entering) = match event {
            HoverEvent::Enter(entity) => (entity, true),
            HoverEvent::Leave(entity) => (entity, false),
        };
        let Ok(mut lift) = self.world.get::<&mut HoverLiftAnimator>(entity) else {
            log::trace!("hover event for {:?} without a lift", entity);
            return false;
        };
        if entering { lift.enter() } else { lift.leave() }
    }

    /// Start the hover rise on `entity`.
    ///
    /// Returns false if the event had no effect: the entity has no lift, its
    /// base height has not been captured by a tick yet, or it was disposed.
    pub fn hover_enter(&mut self, entity: hecs::Entity) -> bool {
        self.dispatch(HoverEvent::Enter(entity))
    }

    /// Start the hover fall on `entity`. Returns false like
    /// [`hover_enter`](Self::hover_enter).
    pub fn hover_leave(&mut self, entity: hecs::Entity) -> bool {
        self.dispatch(HoverEvent::Leave(entity))
    }

    /// Release the pointer subscription and cancel every lift. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.rig.dispose();
        for (_, lift) in self.world.query_mut::<&mut HoverLiftAnimator>() {
            lift.dispose();
        }
        self.disposed = true;
        log::info!("showcase disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rig(&self) -> &DampedCameraRig {
        &self.rig
    }

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    pub fn heroes(&self) -> &[hecs::Entity] {
        &self.heroes
    }

    /// Hero entity by name.
    pub fn hero(&self, name: &str) -> Option<hecs::Entity> {
        self.heroes.iter().copied().find(|&entity| {
            self.world
                .get::<&HeroObject>(entity)
                .is_ok_and(|hero| hero.name == name)
        })
    }

    /// The entity currently under the cursor, when built-in picking is on.
    pub fn hovered(&self) -> Option<hecs::Entity> {
        self.tracker.hovered()
    }

    pub fn focal_points(&self) -> &[Vec3] {
        &self.focal_points
    }

    /// Center of the hero objects, for depth-of-focus.
    pub fn focal_centroid(&self) -> Vec3 {
        particles::focal_centroid(&self.focal_points)
    }

    pub fn particles(&self) -> &ParticleDriftField {
        &self.particles
    }

    /// Mutable access for clearing the upload flag.
    pub fn particles_mut(&mut self) -> &mut ParticleDriftField {
        &mut self.particles
    }

    /// Draw matrix of `entity`'s lifted part.
    pub fn part_matrix(&self, entity: hecs::Entity) -> Option<Mat4> {
        let transform = self.world.get::<&Transform>(entity).ok()?;
        let part = self.world.get::<&DisplaceablePart>(entity).ok()?;
        Some(part.world_matrix(&transform))
    }
}
