//! ECS components for hero objects.
//!
//! A hero entity carries:
//!
//! - [`HeroObject`]: its name
//! - [`Transform`]: world placement, read by picking and the renderer
//! - [`DisplaceablePart`]: the sub-mesh that lifts on hover
//! - [`HoverLiftAnimator`]: the lift tween driving that part
//! - [`Collider`]: optional hover hit shape
//!
//! ```
//! use vista::*;
//!
//! let mut world = World::new();
//! let swan = HEROES[1].spawn(&mut world, LiftConfig::default()).unwrap();
//!
//! advance_hover_lifts(&mut world, 0.016);
//! let lift = world.get::<&HoverLiftAnimator>(swan).unwrap();
//! assert_eq!(lift.base_y(), Some(0.0));
//! ```

use glam::{Mat4, Vec3};

use crate::config::{ConfigError, LiftConfig};
use crate::hover::HoverLiftAnimator;
use crate::picking::Collider;
use crate::transform::Transform;

/// Marks an entity as one of the scene's hero objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroObject {
    pub name: String,
}

/// The part of a hero that moves on hover, relative to the hero's transform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplaceablePart {
    pub local: Transform,
}

impl DisplaceablePart {
    /// Draw matrix of the part under `parent`.
    pub fn world_matrix(&self, parent: &Transform) -> Mat4 {
        parent.matrix() * self.local.matrix()
    }
}

/// Static placement of a hero object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroSpec {
    pub name: &'static str,
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    pub scale: f32,
    /// Hit shape in the model's local units; scaled with the hero.
    pub collider: Collider,
    /// Resting position of the lifted part, in the model's local units.
    pub part_offset: Vec3,
    pub part_scale: f32,
}

/// The showcase's hero objects.
pub const HEROES: [HeroSpec; 3] = [
    HeroSpec {
        name: "wyvern",
        position: Vec3::new(-12.0, 21.0, 0.0),
        rotation: Vec3::new(0.015, -0.05, -0.1),
        scale: 26.0,
        collider: Collider::Sphere { radius: 0.5 },
        part_offset: Vec3::new(0.0, 0.121, 0.0),
        part_scale: 1.264,
    },
    HeroSpec {
        name: "swan",
        position: Vec3::new(0.0, 7.0, -40.0),
        rotation: Vec3::new(-0.02, -0.75, -0.1),
        scale: 20.0,
        collider: Collider::Sphere { radius: 0.5 },
        part_offset: Vec3::ZERO,
        part_scale: 1.096,
    },
    HeroSpec {
        name: "shells",
        position: Vec3::new(-2.0, -0.6, 33.0),
        rotation: Vec3::new(0.1, 0.6, -0.12),
        scale: 14.0,
        collider: Collider::Sphere { radius: 0.5 },
        part_offset: Vec3::ZERO,
        part_scale: 1.0,
    },
];

impl HeroSpec {
    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position)
            .euler(self.rotation.x, self.rotation.y, self.rotation.z)
            .uniform_scale(self.scale)
    }

    /// The lifted part at rest.
    pub fn part(&self) -> DisplaceablePart {
        DisplaceablePart {
            local: Transform::from_position(self.part_offset).uniform_scale(self.part_scale),
        }
    }

    /// Spawn this hero with a hover lift on its displaceable part.
    pub fn spawn(
        &self,
        world: &mut hecs::World,
        lift: LiftConfig,
    ) -> Result<hecs::Entity, ConfigError> {
        let animator = HoverLiftAnimator::new(lift)?;
        Ok(world.spawn((
            HeroObject {
                name: self.name.to_string(),
            },
            self.transform(),
            self.part(),
            animator,
            self.collider,
        )))
    }
}

/// Advance every hover lift and write the result into its part's local Y.
///
/// The first time a lift is seen its resting height is captured from the
/// part's current Y.
pub fn advance_hover_lifts(world: &mut hecs::World, dt: f32) {
    let lifts = world.query_mut::<(&mut DisplaceablePart, &mut HoverLiftAnimator)>();
    for (_, (part, lift)) in lifts {
        if !lift.is_initialized() && lift.initialize(part.local.position.y).is_ok() {
            log::trace!("hover lift base height {}", part.local.position.y);
        }
        if let Some(y) = lift.advance(dt) {
            part.local.position.y = y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_heroes_are_queryable() {
        let mut world = hecs::World::new();
        for hero in &HEROES {
            hero.spawn(&mut world, LiftConfig::default()).unwrap();
        }
        let names: Vec<_> = world
            .query_mut::<&HeroObject>()
            .into_iter()
            .map(|(_, hero)| hero.name.clone())
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names.iter().any(|n| n == "swan"));
    }

    #[test]
    fn lift_writes_only_part_y() {
        let mut world = hecs::World::new();
        let entity = HEROES[0].spawn(&mut world, LiftConfig::default()).unwrap();
        {
            let mut part = world.get::<&mut DisplaceablePart>(entity).unwrap();
            part.local.position = Vec3::new(0.3, 0.5, -0.2);
        }

        advance_hover_lifts(&mut world, 0.0);
        world.get::<&mut HoverLiftAnimator>(entity).unwrap().enter();
        advance_hover_lifts(&mut world, 5.0);

        let part = world.get::<&DisplaceablePart>(entity).unwrap();
        assert!((part.local.position.y - 0.55).abs() < 1e-6);
        assert_eq!(part.local.position.x, 0.3);
        assert_eq!(part.local.position.z, -0.2);

        let placement = world.get::<&Transform>(entity).unwrap();
        assert_eq!(*placement, HEROES[0].transform());
    }

    #[test]
    fn wyvern_lift_rests_on_its_stand() {
        let mut world = hecs::World::new();
        let wyvern = HEROES[0].spawn(&mut world, LiftConfig::default()).unwrap();
        advance_hover_lifts(&mut world, 0.0);
        assert_eq!(
            world.get::<&HoverLiftAnimator>(wyvern).unwrap().base_y(),
            Some(0.121)
        );

        world.get::<&mut HoverLiftAnimator>(wyvern).unwrap().enter();
        advance_hover_lifts(&mut world, 5.0);
        let part = world.get::<&DisplaceablePart>(wyvern).unwrap();
        assert!((part.local.position.y - 0.171).abs() < 1e-6);
        assert_eq!(part.local.scale, Vec3::splat(1.264));
    }

    #[test]
    fn part_matrix_composes_with_parent() {
        let parent = Transform::from_position(Vec3::new(1.0, 0.0, 0.0)).uniform_scale(2.0);
        let part = DisplaceablePart {
            local: Transform::from_position(Vec3::new(0.0, 0.5, 0.0)),
        };
        let origin = part.world_matrix(&parent).transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn invalid_lift_config_fails_spawn() {
        let mut world = hecs::World::new();
        let lift = LiftConfig {
            fall_duration: f32::NAN,
            ..Default::default()
        };
        assert!(HEROES[2].spawn(&mut world, lift).is_err());
        assert_eq!(world.len(), 0);
    }
}
