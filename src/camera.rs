use glam::{Mat4, Vec3};

/// The camera handle the host renders with.
///
/// Provides position, orientation, and projection parameters. The host owns
/// it; [`DampedCameraRig`](crate::DampedCameraRig) is the only thing in this
/// crate that mutates it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub fov: f32, // radians
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 45f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: impl Into<Vec3>) -> Self {
        self.position = position.into();
        self
    }

    pub fn looking_at(mut self, target: impl Into<Vec3>) -> Self {
        self.look_at(target.into());
        self
    }

    /// Orient the camera toward a world-space point.
    ///
    /// Leaves the orientation untouched when the point coincides with the
    /// camera position.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(forward) = (target - self.position).try_normalize() {
            self.forward = forward;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

/// Spherical placement of a camera around a target point.
///
/// `polar` is measured from the +Y axis and `azimuth` from +Z toward +X,
/// matching the usual `(r, phi, theta)` convention for scene cameras.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SphericalPlacement {
    pub radius: f32,
    /// Horizontal angle in radians.
    pub azimuth: f32,
    /// Angle from the vertical axis in radians.
    pub polar: f32,
    /// Point the camera looks at once placed.
    pub target: Vec3,
}

impl Default for SphericalPlacement {
    fn default() -> Self {
        Self {
            radius: 55.0,
            azimuth: 80f32.to_radians(),
            polar: std::f32::consts::PI / 2.1,
            target: Vec3::new(0.0, 17.0, 0.0),
        }
    }
}

impl SphericalPlacement {
    /// World position for this placement, relative to the world origin.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.polar.sin() * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * self.polar.sin() * self.azimuth.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_points_forward_at_target() {
        let mut camera = Camera::new().at(Vec3::ZERO);
        camera.look_at(Vec3::new(0.0, 0.0, 10.0));
        assert!((camera.forward - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn look_at_own_position_keeps_orientation() {
        let mut camera = Camera::new();
        let before = camera.forward;
        camera.look_at(camera.position);
        assert_eq!(camera.forward, before);
    }

    #[test]
    fn spherical_placement_has_requested_radius() {
        let placement = SphericalPlacement::default();
        let position = placement.position();
        assert!((position.length() - placement.radius).abs() < 1e-3);
        // polar just under 90 degrees puts the camera slightly above the ground plane
        assert!(position.y > 0.0);
    }
}
