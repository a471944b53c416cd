//! Pointer hit testing against hero objects, producing hover events.
//!
//! Hosts with their own hit testing can call
//! [`Showcase::hover_enter`](crate::Showcase::hover_enter) and
//! [`Showcase::hover_leave`](crate::Showcase::hover_leave) directly. Everyone
//! else gets:
//!
//! - [`Ray`]: a picking ray built from the cursor and camera
//! - [`Collider`]: cheap box/sphere shapes attached to hero entities
//! - [`HoverTracker`]: turns "what is under the cursor this frame" into
//!   enter/leave transitions

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::camera::Camera;
use crate::transform::Transform;

/// A ray in 3D space with a normalized direction.
///
/// ```
/// use vista::{Ray, Vec3};
///
/// let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
/// assert_eq!(ray.point_at(5.0), Vec3::new(0.0, 1.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Unproject a window pixel through the inverse view-projection.
    pub fn from_screen(cursor: Vec2, viewport: Vec2, view: Mat4, projection: Mat4) -> Self {
        // Window pixels to NDC, with Y flipped
        let ndc_x = (2.0 * cursor.x / viewport.x) - 1.0;
        let ndc_y = 1.0 - (2.0 * cursor.y / viewport.y);

        let inv_view_proj = (projection * view).inverse();
        let near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near_point = near.truncate() / near.w;
        let far_point = far.truncate() / far.w;

        Self {
            origin: near_point,
            direction: (far_point - near_point).normalize_or_zero(),
        }
    }

    /// Picking ray through `cursor` for `camera`. `None` for an empty viewport.
    pub fn from_camera(camera: &Camera, cursor: Vec2, viewport: Vec2) -> Option<Self> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let aspect = viewport.x / viewport.y;
        Some(Self::from_screen(
            cursor,
            viewport,
            camera.view_matrix(),
            camera.projection_matrix(aspect),
        ))
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the nearest positive hit on an AABB.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for i in 0..3 {
            let origin = self.origin[i];
            let dir = self.direction[i];

            if dir.abs() < f32::EPSILON {
                // Parallel to this slab
                if origin < min[i] || origin > max[i] {
                    return None;
                }
                continue;
            }

            let inv_dir = 1.0 / dir;
            let mut t1 = (min[i] - origin) * inv_dir;
            let mut t2 = (max[i] - origin) * inv_dir;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        nearest_positive(t_min, t_max)
    }

    /// Distance to the nearest positive hit on a sphere.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let a = self.direction.dot(self.direction);
        let b = 2.0 * oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);
        nearest_positive(t1, t2)
    }
}

fn nearest_positive(near: f32, far: f32) -> Option<f32> {
    if near > 0.0 {
        Some(near)
    } else if far > 0.0 {
        Some(far)
    } else {
        None
    }
}

/// A collision shape for hover hit testing, centered on the entity's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    /// Axis-aligned box defined by half-extents.
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Collider {
    /// Box collider from full dimensions.
    pub fn box_collider(size: Vec3) -> Self {
        Self::Box {
            half_extents: size * 0.5,
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Distance along `ray` to this collider placed by `transform`.
    pub fn intersect(&self, ray: &Ray, transform: &Transform) -> Option<f32> {
        match self {
            Collider::Box { half_extents } => {
                let scaled_half = *half_extents * transform.scale;
                ray.intersect_aabb(
                    transform.position - scaled_half,
                    transform.position + scaled_half,
                )
            }
            Collider::Sphere { radius } => {
                let avg_scale = transform.scale.element_sum() / 3.0;
                ray.intersect_sphere(transform.position, radius * avg_scale)
            }
        }
    }
}

/// A ray-collider intersection.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub entity: hecs::Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Closest entity with a `Transform` and `Collider` hit by `ray`.
pub fn raycast(world: &hecs::World, ray: &Ray) -> Option<RayHit> {
    let mut query = world.query::<(&Transform, &Collider)>();
    query
        .iter()
        .filter_map(|(entity, (transform, collider))| {
            collider.intersect(ray, transform).map(|distance| RayHit {
                entity,
                distance,
                point: ray.point_at(distance),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// A hover transition for one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    Enter(hecs::Entity),
    Leave(hecs::Entity),
}

/// Remembers which entity is under the cursor and reports changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverTracker {
    hovered: Option<hecs::Entity>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<hecs::Entity> {
        self.hovered
    }

    /// Feed this frame's hit. Emits `Leave` for the old entity before `Enter`
    /// for the new one; nothing when the hovered entity is unchanged.
    pub fn update(
        &mut self,
        hit: Option<hecs::Entity>,
    ) -> impl Iterator<Item = HoverEvent> + use<> {
        let previous = std::mem::replace(&mut self.hovered, hit);
        let (leave, enter) = if previous == hit {
            (None, None)
        } else {
            (previous.map(HoverEvent::Leave), hit.map(HoverEvent::Enter))
        };
        leave.into_iter().chain(enter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_box_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray.intersect_aabb(Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_box_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray.intersect_aabb(Vec3::splat(-1.0), Vec3::splat(1.0)).is_none());
    }

    #[test]
    fn ray_from_inside_sphere_hits_far_side() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn center_of_screen_ray_follows_camera_forward() {
        let camera = Camera::new().at(Vec3::new(0.0, 0.0, 10.0)).looking_at(Vec3::ZERO);
        let viewport = Vec2::new(800.0, 600.0);
        let ray = Ray::from_camera(&camera, viewport * 0.5, viewport).unwrap();
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!(Ray::from_camera(&camera, Vec2::ZERO, Vec2::ZERO).is_none());
    }

    #[test]
    fn raycast_picks_closest_entity() {
        let mut world = hecs::World::new();
        let far = world.spawn((
            Transform::from_position(Vec3::new(0.0, 0.0, -10.0)),
            Collider::sphere(1.0),
        ));
        let near = world.spawn((
            Transform::from_position(Vec3::new(0.0, 0.0, -3.0)),
            Collider::box_collider(Vec3::ONE),
        ));
        world.spawn((Transform::from_position(Vec3::new(0.0, 0.0, -1.0)),));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = raycast(&world, &ray).unwrap();
        assert_eq!(hit.entity, near);
        assert!((hit.distance - 2.5).abs() < 1e-5);

        world.despawn(near).unwrap();
        assert_eq!(raycast(&world, &ray).unwrap().entity, far);
    }

    #[test]
    fn collider_scales_with_transform() {
        let ray = Ray::new(Vec3::new(0.0, 1.5, 5.0), Vec3::NEG_Z);
        let small = Transform::new();
        let large = Transform::new().uniform_scale(2.0);
        assert!(Collider::sphere(1.0).intersect(&ray, &small).is_none());
        assert!(Collider::sphere(1.0).intersect(&ray, &large).is_some());
    }

    #[test]
    fn tracker_reports_transitions() {
        let mut world = hecs::World::new();
        let a = world.spawn(());
        let b = world.spawn(());
        let mut tracker = HoverTracker::new();

        assert_eq!(
            tracker.update(Some(a)).collect::<Vec<_>>(),
            vec![HoverEvent::Enter(a)]
        );
        assert_eq!(tracker.update(Some(a)).count(), 0);
        assert_eq!(
            tracker.update(Some(b)).collect::<Vec<_>>(),
            vec![HoverEvent::Leave(a), HoverEvent::Enter(b)]
        );
        assert_eq!(
            tracker.update(None).collect::<Vec<_>>(),
            vec![HoverEvent::Leave(b)]
        );
        assert_eq!(tracker.hovered(), None);
    }
}
