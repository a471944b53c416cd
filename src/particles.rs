//! Ambient particles rising through a box around the hero objects.

use glam::Vec3;
use rand::Rng;

use crate::config::{ConfigError, DriftConfig};

/// Average of the hero focal points. Zero when there are none.
pub fn focal_centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    points.iter().copied().sum::<Vec3>() / points.len() as f32
}

/// Axis-aligned box the particles live in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftBounds {
    pub center: Vec3,
    /// Extent along X.
    pub width: f32,
    /// Extent along Z.
    pub depth: f32,
    /// Extent along Y.
    pub height: f32,
}

impl DriftBounds {
    /// Box centered on the focal centroid, raised by the configured bias.
    pub fn around(focal_points: &[Vec3], config: &DriftConfig) -> Self {
        Self {
            center: focal_centroid(focal_points) + Vec3::Y * config.vertical_bias,
            width: config.width,
            depth: config.depth,
            height: config.height,
        }
    }

    pub fn lower(&self) -> f32 {
        self.center.y - self.height * 0.5
    }

    pub fn upper(&self) -> f32 {
        self.center.y + self.height * 0.5
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents()
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents()
    }

    fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }
}

/// A fixed set of points drifting upward and wrapping inside [`DriftBounds`].
///
/// Positions are scattered once at construction; afterwards only Y changes.
/// A particle that rises past the top re-enters at the bottom, carrying over
/// the distance it overshot, so each one traces a continuous rising column.
#[derive(Clone, Debug)]
pub struct ParticleDriftField {
    positions: Vec<Vec3>,
    bounds: DriftBounds,
    speed: f32,
    dirty: bool,
}

impl ParticleDriftField {
    /// Scatter `config.count` particles uniformly through the box around `focal_points`.
    pub fn new<R: Rng>(
        config: &DriftConfig,
        focal_points: &[Vec3],
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = DriftBounds::around(focal_points, config);
        let (min, max) = (bounds.min(), bounds.max());

        let positions = (0..config.count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(min.x..max.x),
                    rng.random_range(min.y..max.y),
                    rng.random_range(min.z..max.z),
                )
            })
            .collect();

        log::debug!(
            "particle field: {} points around {:?}",
            config.count,
            bounds.center
        );

        Ok(Self {
            positions,
            bounds,
            speed: config.speed,
            dirty: true,
        })
    }

    /// Advance every particle by `speed * dt`, wrapping past the top.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let step = self.speed * dt;
        let lower = self.bounds.lower();
        let upper = self.bounds.upper();
        let height = self.bounds.height;

        for p in &mut self.positions {
            let y = p.y + step;
            p.y = if y > upper {
                lower + (y - lower).rem_euclid(height)
            } else {
                y
            };
        }
        self.dirty = true;
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as raw `f32` triples for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Whether positions changed since the last call. Clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn bounds(&self) -> &DriftBounds {
        &self.bounds
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FOCAL: [Vec3; 3] = [
        Vec3::new(-12.0, 21.0, 0.0),
        Vec3::new(0.0, 7.0, -40.0),
        Vec3::new(-2.0, -0.6, 33.0),
    ];

    fn field(config: DriftConfig) -> ParticleDriftField {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        ParticleDriftField::new(&config, &FOCAL, &mut rng).unwrap()
    }

    #[test]
    fn centroid_of_hero_points() {
        let c = focal_centroid(&FOCAL);
        assert!((c - Vec3::new(-14.0 / 3.0, 27.4 / 3.0, -7.0 / 3.0)).length() < 1e-4);
        assert_eq!(focal_centroid(&[]), Vec3::ZERO);
    }

    #[test]
    fn scatters_inside_biased_box() {
        let config = DriftConfig::default();
        let field = field(config);
        assert_eq!(field.len(), config.count);

        let bounds = field.bounds();
        let expected_center = focal_centroid(&FOCAL) + Vec3::Y * config.vertical_bias;
        assert!((bounds.center - expected_center).length() < 1e-5);
        assert!(field.positions().iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn same_seed_same_field() {
        let a = field(DriftConfig::default());
        let b = field(DriftConfig::default());
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn rejects_invalid_box() {
        let config = DriftConfig {
            width: -1.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(ParticleDriftField::new(&config, &FOCAL, &mut rng).is_err());
    }

    #[test]
    fn drift_moves_only_y() {
        let mut field = field(DriftConfig::default());
        let before = field.positions().to_vec();
        field.update(0.1);

        for (old, new) in before.iter().zip(field.positions()) {
            assert_eq!(old.x, new.x);
            assert_eq!(old.z, new.z);
        }
        assert!(field.positions().iter().all(|p| field.bounds().contains(*p)));
    }

    #[test]
    fn wraps_with_continuation() {
        let config = DriftConfig {
            count: 1,
            speed: 2.0,
            ..Default::default()
        };
        let mut field = field(config);
        let upper = field.bounds().upper();
        let lower = field.bounds().lower();
        let x = field.positions[0].x;

        let eps = 0.25;
        field.positions[0].y = upper - eps;
        field.update(0.5); // s * dt = 1.0 > eps

        let p = field.positions()[0];
        assert!((p.y - (lower + (1.0 - eps))).abs() < 1e-4, "{} vs {}", p.y, lower + 0.75);
        assert_eq!(p.x, x);
    }

    #[test]
    fn large_steps_stay_in_bounds() {
        let mut field = field(DriftConfig::default());
        field.update(1000.0);
        assert!(field.positions().iter().all(|p| field.bounds().contains(*p)));
    }

    #[test]
    fn dirty_flag_tracks_updates() {
        let mut field = field(DriftConfig::default());
        assert!(field.take_dirty());
        assert!(!field.take_dirty());
        field.update(0.016);
        assert!(field.take_dirty());
    }

    #[test]
    fn byte_view_covers_all_points() {
        let field = field(DriftConfig::default());
        assert_eq!(field.as_bytes().len(), field.len() * 12);
    }

    #[test]
    fn empty_field_is_fine() {
        let mut field = field(DriftConfig {
            count: 0,
            ..Default::default()
        });
        field.update(1.0);
        assert!(field.is_empty());
    }
}
