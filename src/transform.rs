use glam::{EulerRot, Mat4, Quat, Vec3};

/// Placement of a hero object, or of a lifted part relative to its hero.
///
/// Hero entities carry one as a component; each [`DisplaceablePart`](crate::DisplaceablePart)
/// holds another whose `position.y` is the only field the hover lift writes.
///
/// ```
/// use vista::{Transform, Vec3};
///
/// let swan = Transform::from_position(Vec3::new(0.0, 7.0, -40.0))
///     .euler(-0.02, -0.75, -0.1)
///     .uniform_scale(20.0);
/// assert_eq!(swan.scale, Vec3::splat(20.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// XYZ Euler angles in radians.
    pub fn euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self
    }

    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
