use glam::*;

use crate::ControlConfig;

/// A camera manipulation, see [`Viewer::handle`](crate::Viewer::handle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Orbit by relative azimuth and elevation in radians.
    RotateBy { azimuth: f32, elevation: f32 },
    /// Continuously change the distance, e.g. during a drag or pinch.
    DollyBy(f32),
    /// Change the distance by one discrete step, e.g. a wheel notch.
    ZoomBy(f32),
    /// Set the orbit target.
    SetTarget(Vec3),
    /// The end of a drag or touch gesture.
    EndDrag,
}

impl CameraCommand {
    /// Check if the command should re-sort the splats.
    ///
    /// Continuous manipulations do not, the order is refreshed when the gesture ends.
    pub fn triggers_sort(&self) -> bool {
        matches!(self, Self::ZoomBy(..) | Self::EndDrag)
    }
}

/// The pointer button of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragButton {
    /// Orbit.
    Primary,
    /// Dolly.
    Secondary,
}

/// Translates pointer and touch deltas into [`CameraCommand`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitControls {
    pub config: ControlConfig,
}

impl OrbitControls {
    /// Create new controls.
    pub fn new(config: ControlConfig) -> Self {
        Self { config }
    }

    /// A pointer moved by `delta` pixels with `button` held.
    pub fn drag(&self, delta: Vec2, button: DragButton) -> CameraCommand {
        match button {
            DragButton::Primary => CameraCommand::RotateBy {
                azimuth: -delta.x * self.config.rotate_sensitivity,
                elevation: delta.y * self.config.rotate_sensitivity,
            },
            DragButton::Secondary => {
                CameraCommand::DollyBy(delta.y * self.config.drag_zoom_sensitivity)
            }
        }
    }

    /// The wheel scrolled by `delta`.
    pub fn wheel(&self, delta: f32) -> CameraCommand {
        CameraCommand::ZoomBy(delta * self.config.wheel_zoom_sensitivity)
    }

    /// The distance between two touches changed from `previous_span` to `span` pixels.
    pub fn pinch(&self, previous_span: f32, span: f32) -> CameraCommand {
        CameraCommand::DollyBy((previous_span - span) * self.config.pinch_zoom_sensitivity)
    }

    /// The pointer was released or all touches ended.
    pub fn release(&self) -> CameraCommand {
        CameraCommand::EndDrag
    }
}
