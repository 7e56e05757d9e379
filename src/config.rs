use glam::*;

/// The projection configuration of [`Camera`](crate::Camera).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y: 60f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

/// The orbit parameters of [`Camera`](crate::Camera).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            azimuth: 0.4,
            elevation: 0.2,
            distance: 3.5,
            target: Vec3::ZERO,
        }
    }
}

/// The input configuration of [`OrbitControls`](crate::OrbitControls) and
/// [`Viewer`](crate::Viewer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    /// Radians per pixel of primary drag.
    pub rotate_sensitivity: f32,
    /// Distance per pixel of secondary drag.
    pub drag_zoom_sensitivity: f32,
    /// Distance per wheel delta unit.
    pub wheel_zoom_sensitivity: f32,
    /// Distance per pixel change of the pinch span.
    pub pinch_zoom_sensitivity: f32,
    /// Elevation is kept within (-π/2 + margin, π/2 - margin).
    pub elevation_margin: f32,
    pub min_distance: f32,
}

impl ControlConfig {
    /// Get the elevation limit.
    pub fn max_elevation(&self) -> f32 {
        std::f32::consts::FRAC_PI_2 - self.elevation_margin
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            drag_zoom_sensitivity: 0.01,
            wheel_zoom_sensitivity: 0.005,
            pinch_zoom_sensitivity: 0.01,
            elevation_margin: 0.05,
            min_distance: 0.5,
        }
    }
}

/// The render configuration of [`SplatRenderer`](crate::SplatRenderer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Screen pixels per world unit of splat scale.
    pub pixel_scale: f32,
    pub clear_color: Vec4,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixel_scale: 200.0,
            clear_color: Vec4::new(0.02, 0.03, 0.06, 1.0),
        }
    }
}

/// The configuration of [`Viewer`](crate::Viewer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    /// The pose before any scene is loaded.
    pub initial_pose: CameraPose,
    /// The distance the camera is reset to on [`Viewer::load`](crate::Viewer::load).
    pub fit_distance: f32,
    pub controls: ControlConfig,
    pub render: RenderConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let initial_pose = CameraPose::default();

        Self {
            camera: CameraConfig::default(),
            initial_pose,
            fit_distance: initial_pose.distance,
            controls: ControlConfig::default(),
            render: RenderConfig::default(),
        }
    }
}
