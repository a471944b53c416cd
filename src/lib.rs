//! # Vista
//!
//! **The camera and ambient-motion layer of a showcase scene.**
//!
//! A rendered scene with a few hero objects feels alive when the camera leans
//! toward the pointer, objects rise a little when hovered, and dust drifts
//! upward through the frame. Vista does exactly that and nothing else: it owns
//! no renderer, it just mutates a [`Camera`], some ECS transforms and a
//! particle buffer every frame.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vista::*;
//!
//! fn main() {
//!     env_logger::init();
//!     run(ShowcaseConfig::default()).unwrap();
//! }
//! ```
//!
//! Or drive it from your own loop:
//!
//! ```
//! use vista::*;
//!
//! let hub = PointerHub::new();
//! hub.set_viewport(Vec2::new(800.0, 600.0));
//! let mut showcase = Showcase::new(ShowcaseConfig::default(), &hub).unwrap();
//!
//! hub.pointer_moved(Vec2::new(700.0, 100.0));
//! showcase.tick(1.0 / 60.0);
//!
//! let view = showcase.camera().view_matrix();
//! let dust = showcase.particles().as_bytes();
//! # let _ = (view, dust);
//! ```
//!
//! ## Pieces
//!
//! - **Pointer** - [`PointerHub`] collects cursor events; [`PointerInputMapper`]
//!   turns pixels into dead-zoned axes.
//! - **Camera sway** - [`DampedCameraRig`] eases the look point toward the
//!   pointer with frame-rate independent damping.
//! - **Hover lift** - [`HoverLiftAnimator`] tweens a part up on hover and back
//!   down on leave, interruptibly.
//! - **Drift** - [`ParticleDriftField`] keeps a box of points rising and
//!   wrapping around the hero objects.

mod app;
mod camera;
mod camera_rig;
mod config;
mod easing;
mod ecs;
mod hover;
mod input;
mod particles;
mod picking;
mod pointer;
mod showcase;
mod transform;

pub use app::{AppConfig, run, run_with_config};
pub use camera::{Camera, SphericalPlacement};
pub use camera_rig::{DampedCameraRig, RigBasis, RigError, RigPose, RigState, damp};
pub use config::{ConfigError, DriftConfig, LiftConfig, RigConfig, ShowcaseConfig};
pub use easing::{Easing, ParseEasingError};
pub use hover::{HoverLiftAnimator, LiftError, LiftPhase};
pub use input::{PointerHub, PointerSubscription};
pub use particles::{DriftBounds, ParticleDriftField, focal_centroid};
pub use pointer::PointerInputMapper;
pub use showcase::{Showcase, ShowcaseError};
pub use transform::Transform;

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

// ECS support
pub use ecs::{DisplaceablePart, HEROES, HeroObject, HeroSpec, advance_hover_lifts};
pub use hecs::{Entity, World};

// Hover picking
pub use picking::{Collider, HoverEvent, HoverTracker, Ray, RayHit, raycast};
