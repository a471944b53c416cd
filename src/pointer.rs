use glam::Vec2;

use crate::config::ConfigError;

/// Maps pointer positions to signed, dead-zoned axes in `[-1, 1]`.
///
/// Normalization puts +X to the right and +Y up (the reverse of window
/// coordinates). The dead zone removes jitter around the viewport center and
/// rescales the rest so full deflection still reaches ±1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInputMapper {
    dead_zone: f32,
}

impl PointerInputMapper {
    /// Create a mapper. The dead zone must lie in `[0, 1)`.
    pub fn new(dead_zone: f32) -> Result<Self, ConfigError> {
        if !dead_zone.is_finite() || !(0.0..1.0).contains(&dead_zone) {
            return Err(ConfigError::DeadZoneOutOfRange(dead_zone));
        }
        Ok(Self { dead_zone })
    }

    pub fn dead_zone(&self) -> f32 {
        self.dead_zone
    }

    /// Convert a window-space pixel position into centered axes.
    ///
    /// A zero-sized viewport axis yields 0 on that axis.
    pub fn normalize(position: Vec2, viewport: Vec2) -> Vec2 {
        let x = if viewport.x > 0.0 {
            (position.x / viewport.x) * 2.0 - 1.0
        } else {
            0.0
        };
        let y = if viewport.y > 0.0 {
            -(position.y / viewport.y) * 2.0 + 1.0
        } else {
            0.0
        };
        Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE)
    }

    /// Apply the dead zone to a single axis value.
    pub fn map_axis(&self, v: f32) -> f32 {
        let av = v.abs();
        if av <= self.dead_zone {
            return 0.0;
        }
        let t = (av - self.dead_zone) / (1.0 - self.dead_zone);
        v.signum() * t.clamp(0.0, 1.0)
    }

    /// Apply the dead zone to both axes.
    pub fn map(&self, axes: Vec2) -> Vec2 {
        Vec2::new(self.map_axis(axes.x), self.map_axis(axes.y))
    }
}
