//! Configuration for the camera rig, hover lifts and particle drift.
//!
//! Every struct deserializes with `#[serde(default)]`, so a JSON file only has
//! to name the values it changes:
//!
//! ```
//! use vista::ShowcaseConfig;
//!
//! let config = ShowcaseConfig::from_json_str(r#"{ "rig": { "damping": 4.0 } }"#).unwrap();
//! assert_eq!(config.rig.damping, 4.0);
//! assert_eq!(config.rig.dead_zone, 0.15);
//! ```
//!
//! Validation runs in every constructor that consumes a config, so invalid
//! values never reach per-frame math.

use std::path::Path;

use glam::Vec2;

use crate::camera::SphericalPlacement;
use crate::easing::Easing;

/// Errors produced while loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io(std::io::Error),
    /// Config JSON was malformed or named an unknown easing.
    Parse(serde_json::Error),
    /// Damping rate must be strictly positive.
    NonPositiveDamping(f32),
    /// Dead zone must lie in `[0, 1)`.
    DeadZoneOutOfRange(f32),
    /// A value was NaN or infinite.
    NotFinite(&'static str),
    /// A duration was negative.
    NegativeDuration { field: &'static str, value: f32 },
    /// A box dimension was zero or negative.
    NonPositiveExtent { field: &'static str, value: f32 },
    /// Particles cannot drift downward.
    NegativeDriftSpeed(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::NonPositiveDamping(v) => {
                write!(f, "Damping must be positive, got {}", v)
            }
            ConfigError::DeadZoneOutOfRange(v) => {
                write!(f, "Dead zone must be in [0, 1), got {}", v)
            }
            ConfigError::NotFinite(field) => write!(f, "'{}' must be finite", field),
            ConfigError::NegativeDuration { field, value } => {
                write!(f, "'{}' must not be negative, got {}", field, value)
            }
            ConfigError::NonPositiveExtent { field, value } => {
                write!(f, "'{}' must be positive, got {}", field, value)
            }
            ConfigError::NegativeDriftSpeed(v) => {
                write!(f, "Drift speed must not be negative, got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite(field))
    }
}

fn duration(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? < 0.0 {
        return Err(ConfigError::NegativeDuration { field, value });
    }
    Ok(())
}

fn extent(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? <= 0.0 {
        return Err(ConfigError::NonPositiveExtent { field, value });
    }
    Ok(())
}

/// Pointer-driven camera sway settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Exponential damping rate in 1/seconds. Higher settles faster.
    pub damping: f32,
    /// Pointer axis magnitude mapped to zero response.
    pub dead_zone: f32,
    /// Look-at sway along the camera's right/up axes at full deflection.
    pub look_amplitude: Vec2,
    /// World X/Y camera displacement at full deflection. Zero disables an axis.
    pub position_amplitude: Vec2,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            damping: 2.0,
            dead_zone: 0.15,
            look_amplitude: Vec2::new(2.0, 1.2),
            position_amplitude: Vec2::ZERO,
        }
    }
}

impl RigConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if finite("rig.damping", self.damping)? <= 0.0 {
            return Err(ConfigError::NonPositiveDamping(self.damping));
        }
        let dz = finite("rig.dead_zone", self.dead_zone)?;
        if !(0.0..1.0).contains(&dz) {
            return Err(ConfigError::DeadZoneOutOfRange(dz));
        }
        finite("rig.look_amplitude.x", self.look_amplitude.x)?;
        finite("rig.look_amplitude.y", self.look_amplitude.y)?;
        finite("rig.position_amplitude.x", self.position_amplitude.x)?;
        finite("rig.position_amplitude.y", self.position_amplitude.y)?;
        Ok(())
    }
}

/// Hover lift settings for one hoverable object.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LiftConfig {
    /// How far above its base Y the object rises while hovered.
    pub height: f32,
    /// Seconds to reach the raised position.
    pub rise_duration: f32,
    /// Seconds to settle back to the base position.
    pub fall_duration: f32,
    pub rise_ease: Easing,
    pub fall_ease: Easing,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            height: 0.05,
            rise_duration: 1.5,
            fall_duration: 1.0,
            rise_ease: Easing::ExpoOut,
            fall_ease: Easing::PowerOut(3),
        }
    }
}

impl LiftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("lift.height", self.height)?;
        duration("lift.rise_duration", self.rise_duration)?;
        duration("lift.fall_duration", self.fall_duration)?;
        Ok(())
    }
}

/// Ambient particle field settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Number of particles, fixed for the field's lifetime.
    pub count: usize,
    /// Box extent along X.
    pub width: f32,
    /// Box extent along Z.
    pub depth: f32,
    /// Box extent along Y; particles wrap within it.
    pub height: f32,
    /// Vertical offset of the box center from the focal centroid.
    pub vertical_bias: f32,
    /// Upward speed in units per second.
    pub speed: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            count: 240,
            width: 80.0,
            depth: 80.0,
            height: 30.0,
            vertical_bias: 4.0,
            speed: 0.6,
        }
    }
}

impl DriftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        extent("drift.width", self.width)?;
        extent("drift.depth", self.depth)?;
        extent("drift.height", self.height)?;
        finite("drift.vertical_bias", self.vertical_bias)?;
        if finite("drift.speed", self.speed)? < 0.0 {
            return Err(ConfigError::NegativeDriftSpeed(self.speed));
        }
        Ok(())
    }
}

/// Everything needed to build a [`Showcase`](crate::Showcase).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub rig: RigConfig,
    /// Where the camera is placed when the rig attaches.
    pub placement: SphericalPlacement,
    pub lift: LiftConfig,
    pub drift: DriftConfig,
    /// Seed for particle placement. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Hit-test the pointer against hero colliders every tick.
    ///
    /// Disable when the host delivers its own hover events.
    pub picking: bool,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            rig: RigConfig::default(),
            placement: SphericalPlacement::default(),
            lift: LiftConfig::default(),
            drift: DriftConfig::default(),
            seed: None,
            picking: true,
        }
    }
}

impl ShowcaseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rig.validate()?;
        self.lift.validate()?;
        self.drift.validate()?;
        extent("placement.radius", self.placement.radius)?;
        finite("placement.azimuth", self.placement.azimuth)?;
        finite("placement.polar", self.placement.polar)?;
        if !self.placement.target.is_finite() {
            return Err(ConfigError::NotFinite("placement.target"));
        }
        Ok(())
    }
}
