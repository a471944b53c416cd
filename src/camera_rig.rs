//! A pointer-driven camera rig with frame-rate independent damping.
//!
//! The rig places the camera once, then lets the pointer sway the look-at
//! point (and optionally the camera position) around that resting pose:
//!
//! ```
//! use vista::{Camera, DampedCameraRig, PointerHub, RigConfig, SphericalPlacement, Vec2};
//!
//! let hub = PointerHub::new();
//! hub.set_viewport(Vec2::new(800.0, 600.0));
//!
//! let mut camera = Camera::new();
//! let mut rig = DampedCameraRig::new(RigConfig::default(), &hub).unwrap();
//! rig.attach(&mut camera, &SphericalPlacement::default()).unwrap();
//!
//! hub.pointer_moved(Vec2::new(800.0, 300.0));
//! rig.update(&mut camera, 1.0 / 60.0);
//! assert!(rig.look_offset().unwrap().x > 0.0);
//! ```

use glam::{Vec2, Vec3};

use crate::camera::{Camera, SphericalPlacement};
use crate::config::{ConfigError, RigConfig};
use crate::input::{PointerHub, PointerSubscription};
use crate::pointer::PointerInputMapper;

/// Move `current` toward `target` by exponential decay at rate `lambda`.
///
/// Composes exactly across frames: two steps of `dt` equal one step of
/// `2 * dt`, and the result never passes the target.
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    target + (current - target) * (-lambda * dt).exp()
}

/// Errors from misusing the rig's one-shot lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RigError {
    /// The rig already captured its resting pose.
    AlreadyAttached,
    /// The rig was disposed and no longer tracks the pointer.
    Disposed,
}

impl std::fmt::Display for RigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RigError::AlreadyAttached => write!(f, "Camera rig is already attached"),
            RigError::Disposed => write!(f, "Camera rig has been disposed"),
        }
    }
}

impl std::error::Error for RigError {}

/// Camera-relative axes captured at attach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl RigBasis {
    /// Build an orthonormal basis looking from `position` to `target`, with +Y as world up.
    pub fn looking(position: Vec3, target: Vec3) -> Self {
        let forward = (target - position).normalize_or(Vec3::NEG_Z);
        // Looking straight up or down has no defined right; fall back to +X.
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward).normalize();
        Self { right, up, forward }
    }
}

/// The resting pose and current sway of an attached rig.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigPose {
    pub base_position: Vec3,
    pub base_target: Vec3,
    pub basis: RigBasis,
    /// Current sway of the look-at point along `basis.right` / `basis.up`.
    pub look_offset: Vec2,
}

impl RigPose {
    /// The look-at point for the current sway.
    pub fn look_at_point(&self) -> Vec3 {
        self.base_target
            + self.basis.right * self.look_offset.x
            + self.basis.up * self.look_offset.y
    }
}

/// Lifecycle of a [`DampedCameraRig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RigState {
    /// Waiting for [`DampedCameraRig::attach`]; updates are ignored.
    Uninitialized,
    Active(RigPose),
}

/// Sways the camera toward the pointer with critically damped smoothing.
///
/// Each frame the dead-zoned pointer axes set a desired look offset along the
/// camera's own right/up axes, and the current offset decays toward it at the
/// configured damping rate. With a nonzero position amplitude the camera's
/// world X/Y also drift toward the pointer, independently of the look sway.
#[derive(Debug)]
pub struct DampedCameraRig {
    config: RigConfig,
    mapper: PointerInputMapper,
    pointer: PointerSubscription,
    state: RigState,
    disposed: bool,
}

impl DampedCameraRig {
    /// Validate `config` and subscribe to pointer updates from `hub`.
    pub fn new(config: RigConfig, hub: &PointerHub) -> Result<Self, ConfigError> {
        config.validate()?;
        let mapper = PointerInputMapper::new(config.dead_zone)?;

        Ok(Self {
            config,
            mapper,
            pointer: hub.subscribe(),
            state: RigState::Uninitialized,
            disposed: false,
        })
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn state(&self) -> &RigState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, RigState::Active(_)) && !self.disposed
    }

    /// Current look sway, once attached.
    pub fn look_offset(&self) -> Option<Vec2> {
        match &self.state {
            RigState::Active(pose) => Some(pose.look_offset),
            RigState::Uninitialized => None,
        }
    }

    /// Place the camera and capture the resting pose.
    ///
    /// Runs once per rig; the placement is never reapplied.
    pub fn attach(
        &mut self,
        camera: &mut Camera,
        placement: &SphericalPlacement,
    ) -> Result<(), RigError> {
        if self.disposed {
            return Err(RigError::Disposed);
        }
        if let RigState::Active(_) = self.state {
            return Err(RigError::AlreadyAttached);
        }

        camera.position = placement.position();
        camera.up = Vec3::Y;
        camera.look_at(placement.target);

        let pose = RigPose {
            base_position: camera.position,
            base_target: placement.target,
            basis: RigBasis::looking(camera.position, placement.target),
            look_offset: Vec2::ZERO,
        };
        log::debug!(
            "camera rig attached at {:?} looking at {:?}",
            pose.base_position,
            pose.base_target
        );
        self.state = RigState::Active(pose);
        Ok(())
    }

    /// Advance the sway by `dt` seconds and apply it to `camera`.
    ///
    /// A no-op until attached, and after disposal.
    pub fn update(&mut self, camera: &mut Camera, dt: f32) {
        if self.disposed {
            return;
        }
        let RigState::Active(pose) = &mut self.state else {
            log::trace!("camera rig update before attach ignored");
            return;
        };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let damping = self.config.damping;

        let p = self.mapper.map(self.pointer.axes());
        let desired = p * self.config.look_amplitude;

        pose.look_offset.x = damp(pose.look_offset.x, desired.x, damping, dt);
        pose.look_offset.y = damp(pose.look_offset.y, desired.y, damping, dt);

        let amplitude = self.config.position_amplitude;
        if amplitude.x != 0.0 {
            let target_x = pose.base_position.x + p.x * amplitude.x;
            camera.position.x = damp(camera.position.x, target_x, damping, dt);
        }
        if amplitude.y != 0.0 {
            let target_y = pose.base_position.y + p.y * amplitude.y;
            camera.position.y = damp(camera.position.y, target_y, damping, dt);
        }

        camera.look_at(pose.look_at_point());
    }

    /// Release the pointer subscription. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.pointer.unsubscribe();
        self.disposed = true;
        log::debug!("camera rig disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
