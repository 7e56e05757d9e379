use glam::*;

use crate::{
    Camera, CameraCommand, DepthSorter, OrbitControls, SplatStore, ViewerConfig,
    VisibilityPermutation,
};

/// A loaded scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    store: SplatStore,
    permutation: VisibilityPermutation,
}

impl Scene {
    /// Get the splats.
    pub fn store(&self) -> &SplatStore {
        &self.store
    }

    /// Get the current draw order.
    ///
    /// During a drag this reflects the eye at the last sort, not the current one.
    pub fn permutation(&self) -> &VisibilityPermutation {
        &self.permutation
    }
}

/// The viewer session.
///
/// This owns the camera and the current scene, and decides when the splats are re-sorted:
/// on [`Viewer::load`], on [`Viewer::request_sort`], and on the commands for which
/// [`CameraCommand::triggers_sort`] holds. Sorting never happens per frame.
#[derive(Debug, Clone)]
pub struct Viewer {
    config: ViewerConfig,
    camera: Camera,
    scene: Option<Scene>,
    sorter: DepthSorter,
    scene_generation: u64,
    sort_generation: u64,
}

impl Viewer {
    /// Create a new viewer without a scene.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            camera: Camera::new(config.initial_pose, config.camera),
            scene: None,
            sorter: DepthSorter::new(),
            scene_generation: 0,
            sort_generation: 0,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Get the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Get the current scene.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Get the controls translating input deltas for [`Viewer::handle`].
    pub fn controls(&self) -> OrbitControls {
        OrbitControls::new(self.config.controls)
    }

    /// Get the generation of the scene, incremented on every [`Viewer::load`].
    pub fn scene_generation(&self) -> u64 {
        self.scene_generation
    }

    /// Get the generation of the draw order, incremented on every sort.
    pub fn sort_generation(&self) -> u64 {
        self.sort_generation
    }

    /// Get the number of indices to draw.
    pub fn draw_index_count(&self) -> usize {
        self.scene.as_ref().map_or(0, |scene| scene.store.len() * 6)
    }

    /// Replace the current scene.
    ///
    /// The camera is re-targeted to the centroid of the splats at
    /// [`ViewerConfig::fit_distance`], then the splats are sorted. The previous scene is only
    /// dropped once the new one is complete.
    pub fn load(&mut self, store: SplatStore) {
        log::info!("Loading scene with {} splats", store.len());

        self.camera.target = store.centroid();
        self.camera.distance = self.config.fit_distance;

        let permutation = self.sorter.sort(&store, self.camera.eye());

        self.scene = Some(Scene { store, permutation });
        self.scene_generation += 1;
        self.sort_generation += 1;
    }

    /// Re-sort the splats for the current eye.
    ///
    /// Does nothing without a scene.
    pub fn request_sort(&mut self) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        log::debug!("Sort requested");

        scene.permutation = self.sorter.sort(&scene.store, self.camera.eye());
        self.sort_generation += 1;
    }

    /// Apply a camera command.
    ///
    /// Elevation and distance are clamped by [`ControlConfig`](crate::ControlConfig) here.
    ///
    /// Returns `true` if the splats were re-sorted.
    pub fn handle(&mut self, command: CameraCommand) -> bool {
        let controls = &self.config.controls;

        match command {
            CameraCommand::RotateBy {
                azimuth,
                elevation,
            } => {
                let max_elevation = controls.max_elevation();
                self.camera.azimuth += azimuth;
                self.camera.elevation =
                    (self.camera.elevation + elevation).clamp(-max_elevation, max_elevation);
            }
            CameraCommand::DollyBy(delta) | CameraCommand::ZoomBy(delta) => {
                self.camera.distance = (self.camera.distance + delta).max(controls.min_distance);
            }
            CameraCommand::SetTarget(target) => {
                self.camera.target = target;
            }
            CameraCommand::EndDrag => {}
        }

        if !command.triggers_sort() || self.scene.is_none() {
            return false;
        }

        self.request_sort();
        true
    }

    /// Get the view projection matrix for a viewport.
    ///
    /// Returns [`None`] if the viewport has no area.
    pub fn view_projection(&self, viewport: UVec2) -> Option<Mat4> {
        if viewport.cmpeq(UVec2::ZERO).any() {
            return None;
        }

        let viewport = viewport.as_vec2();
        Some(self.camera.view_projection(viewport.x / viewport.y))
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}
