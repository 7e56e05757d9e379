use glam::*;

use crate::{CameraConfig, CameraPose};

/// An orbit camera.
///
/// The camera looks at [`Camera::target`] from a point on the sphere of radius
/// [`Camera::distance`] around it. Inputs are not clamped here, the caller is responsible for
/// keeping `elevation` within (-π/2, π/2) and `distance` positive, see
/// [`Viewer::handle`](crate::Viewer::handle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rotation around the world Y axis in radians.
    pub azimuth: f32,
    /// Angle above the horizontal plane in radians.
    pub elevation: f32,
    pub distance: f32,
    pub target: Vec3,
    pub config: CameraConfig,
}

impl Camera {
    /// Create a new camera.
    pub fn new(pose: CameraPose, config: CameraConfig) -> Self {
        Self {
            azimuth: pose.azimuth,
            elevation: pose.elevation,
            distance: pose.distance,
            target: pose.target,
            config,
        }
    }

    /// Get the current pose.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            azimuth: self.azimuth,
            elevation: self.elevation,
            distance: self.distance,
            target: self.target,
        }
    }

    /// Get the eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();

        self.target + self.distance * Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az)
    }

    /// Get the right handed view matrix, with +Y as world up.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Get the perspective projection matrix.
    ///
    /// `aspect_ratio` must be positive, otherwise the matrix is degenerate.
    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_y,
            aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }

    /// Get the view projection matrix.
    ///
    /// `aspect_ratio` must be positive, otherwise the matrix is degenerate.
    pub fn view_projection(&self, aspect_ratio: f32) -> Mat4 {
        self.projection(aspect_ratio) * self.view()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraPose::default(), CameraConfig::default())
    }
}
