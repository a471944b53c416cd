//! Hover-triggered lift animation for hero objects.
//!
//! Each hoverable object owns one [`HoverLiftAnimator`]. Hover enter starts a
//! rise toward `base_y + height`, hover leave starts a fall back to `base_y`.
//! A new tween always replaces the one in flight, starting from wherever the
//! object currently is, so quick in/out hovers never snap.
//!
//! ```
//! use vista::{HoverLiftAnimator, LiftConfig};
//!
//! let mut lift = HoverLiftAnimator::new(LiftConfig::default()).unwrap();
//! lift.initialize(2.0).unwrap();
//!
//! lift.enter();
//! let y = lift.advance(10.0).unwrap();
//! assert!((y - 2.05).abs() < 1e-6);
//! ```

use crate::config::{ConfigError, LiftConfig};
use crate::easing::Easing;

/// Errors from misusing the animator's one-shot initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiftError {
    /// The base height was already captured.
    AlreadyInitialized,
}

impl std::fmt::Display for LiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiftError::AlreadyInitialized => write!(f, "Hover lift base height already captured"),
        }
    }
}

impl std::error::Error for LiftError {}

/// The tween currently driving an object, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LiftPhase {
    /// At rest; nothing is written.
    Idle,
    /// Moving toward `base_y + height`.
    Rising { start_y: f32, elapsed: f32 },
    /// Moving toward `base_y`.
    Falling { start_y: f32, elapsed: f32 },
}

/// Interruptible rise/fall tween on a single Y coordinate.
#[derive(Clone, Debug)]
pub struct HoverLiftAnimator {
    config: LiftConfig,
    base_y: Option<f32>,
    current_y: f32,
    phase: LiftPhase,
    disposed: bool,
}

impl HoverLiftAnimator {
    pub fn new(config: LiftConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            base_y: None,
            current_y: 0.0,
            phase: LiftPhase::Idle,
            disposed: false,
        })
    }

    pub fn config(&self) -> &LiftConfig {
        &self.config
    }

    /// Capture the resting height. Must run once, before hover events matter.
    pub fn initialize(&mut self, initial_y: f32) -> Result<(), LiftError> {
        if self.base_y.is_some() {
            return Err(LiftError::AlreadyInitialized);
        }
        self.base_y = Some(initial_y);
        self.current_y = initial_y;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.base_y.is_some()
    }

    pub fn base_y(&self) -> Option<f32> {
        self.base_y
    }

    /// Height last written by the animator (the base height while idle).
    pub fn current_y(&self) -> f32 {
        self.current_y
    }

    pub fn phase(&self) -> LiftPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, LiftPhase::Idle)
    }

    /// Where the tween in flight is heading.
    pub fn active_target(&self) -> Option<f32> {
        let base = self.base_y?;
        match self.phase {
            LiftPhase::Idle => None,
            LiftPhase::Rising { .. } => Some(base + self.config.height),
            LiftPhase::Falling { .. } => Some(base),
        }
    }

    /// Hover enter: replace any tween with a rise from the current height.
    ///
    /// Returns false when the event is dropped (before [`initialize`](Self::initialize)
    /// or after [`dispose`](Self::dispose)).
    pub fn enter(&mut self) -> bool {
        if !self.accepts_events("enter") {
            return false;
        }
        self.phase = LiftPhase::Rising {
            start_y: self.current_y,
            elapsed: 0.0,
        };
        true
    }

    /// Hover leave: replace any tween with a fall from the current height.
    ///
    /// Returns false when the event is dropped, like [`enter`](Self::enter).
    pub fn leave(&mut self) -> bool {
        if !self.accepts_events("leave") {
            return false;
        }
        self.phase = LiftPhase::Falling {
            start_y: self.current_y,
            elapsed: 0.0,
        };
        true
    }

    fn accepts_events(&self, event: &str) -> bool {
        if self.disposed {
            log::warn!("hover {} after dispose ignored", event);
            return false;
        }
        if self.base_y.is_none() {
            log::trace!("hover {} before base height capture ignored", event);
            return false;
        }
        true
    }

    /// Step the tween in flight by `dt` seconds.
    ///
    /// Returns the Y to write into the object's transform, or `None` while
    /// idle. The final step lands exactly on the target and returns to idle.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        let base = self.base_y?;
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let (start_y, elapsed, target, duration, ease) = match &mut self.phase {
            LiftPhase::Idle => return None,
            LiftPhase::Rising { start_y, elapsed } => (
                *start_y,
                elapsed,
                base + self.config.height,
                self.config.rise_duration,
                self.config.rise_ease,
            ),
            LiftPhase::Falling { start_y, elapsed } => (
                *start_y,
                elapsed,
                base,
                self.config.fall_duration,
                self.config.fall_ease,
            ),
        };

        *elapsed += dt;
        let t = progress(*elapsed, duration);

        if t >= 1.0 {
            self.current_y = target;
            self.phase = LiftPhase::Idle;
        } else {
            self.current_y = tween(start_y, target, ease, t);
        }
        Some(self.current_y)
    }

    /// Cancel any tween in flight and ignore further events. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.phase = LiftPhase::Idle;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

fn tween(from: f32, to: f32, ease: Easing, t: f32) -> f32 {
    from + (to - from) * ease.apply(t)
}
