pub mod settings;

use std::path::{Path, PathBuf};

use shared::input::apply_controls;
use shared::scenes::{hypercube_scene, preset, PRESET_NAMES};
use shared::wireframe::{fourd_color, project_scene};
use shared::{CameraType, Control, RotationPlane, Scene, SceneState, Segment};

pub use settings::{ControlSettings, UiSettings, ViewerSettings, ViewportSettings};

use crate::ViewerError;

/// Where the current scene came from
#[derive(Debug, Clone, PartialEq)]
pub enum SceneSource {
    Preset(String),
    File(PathBuf),
}

impl SceneSource {
    pub fn label(&self) -> String {
        match self {
            SceneSource::Preset(name) => name.clone(),
            SceneSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

/// Combined viewer state
pub struct ViewerState {
    pub scene: SceneState,
    pub source: SceneSource,
    pub settings: ViewerSettings,
    /// Rotate shapes by their own rotation speed
    pub animate: bool,
    /// Segments from the last [`ViewerState::project`]
    pub segments: Vec<Segment>,
    /// Last load/save error, shown in the status bar
    pub last_error: Option<String>,
}

impl ViewerState {
    /// Open the last used preset, or the hypercube
    pub fn new(settings: ViewerSettings) -> Self {
        let requested = settings
            .last_scene
            .clone()
            .unwrap_or_else(|| PRESET_NAMES[0].to_string());

        let (name, scene) = match preset(&requested) {
            Ok(scene) => (requested, scene),
            Err(e) => {
                tracing::error!("Failed to open scene '{requested}': {e}");
                (PRESET_NAMES[0].to_string(), hypercube_scene())
            }
        };

        Self {
            scene: SceneState::new(scene),
            source: SceneSource::Preset(name),
            settings,
            animate: true,
            segments: Vec::new(),
            last_error: None,
        }
    }

    /// Switch to a preset scene and remember it in settings
    pub fn load_preset(&mut self, name: &str) -> Result<(), ViewerError> {
        let scene = preset(name)?;
        self.set_scene(scene, SceneSource::Preset(name.to_string()));
        self.settings.last_scene = Some(name.to_string());
        tracing::info!("Loaded preset scene '{name}'");
        Ok(())
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), ViewerError> {
        let json = std::fs::read_to_string(path)?;
        let scene: Scene = serde_json::from_str(&json)?;
        scene.validate()?;
        tracing::info!(
            "Loaded scene '{}' from {} ({} shapes)",
            scene.name,
            path.display(),
            scene.shapes.len()
        );
        self.set_scene(scene, SceneSource::File(path.to_path_buf()));
        Ok(())
    }

    /// Save the scene with the current camera as its start camera
    pub fn save_file(&self, path: &Path) -> Result<(), ViewerError> {
        let mut scene = self.scene.scene.clone();
        scene.cam_start = self.scene.camera.clone();
        std::fs::write(path, serde_json::to_string_pretty(&scene)?)?;
        tracing::info!("Saved scene to {}", path.display());
        Ok(())
    }

    pub fn set_scene(&mut self, scene: Scene, source: SceneSource) {
        let aspect = self.scene.camera.aspect;
        self.scene = SceneState::new(scene);
        self.scene.camera.aspect = aspect;
        self.source = source;
        self.last_error = None;
    }

    pub fn reset_camera(&mut self) {
        let aspect = self.scene.camera.aspect;
        self.scene.reset_camera();
        self.scene.camera.aspect = aspect;
    }

    /// Follow the viewport's aspect ratio
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.scene.camera.aspect = f64::from(width / height);
        }
    }

    /// Advance one frame: held controls, then animation
    pub fn step(&mut self, controls: &[Control], dt: f64) {
        let ControlSettings {
            move_sensitivity,
            rotate_sensitivity,
        } = self.settings.controls;
        apply_controls(&mut self.scene, controls, dt, move_sensitivity, rotate_sensitivity);
        if self.animate {
            self.scene.tick(dt);
        }
    }

    /// Mouse look: horizontal drag turns in xz, vertical in yz.
    ///
    /// In single-shape scenes the shape turns instead of the camera.
    pub fn drag_rotate(&mut self, dx: f64, dy: f64) {
        let angles = match self.scene.scene.cam_type {
            CameraType::Single => match self.scene.scene.shapes.get_mut(&0) {
                Some(shape) => &mut shape.orientation,
                None => return,
            },
            CameraType::Free | CameraType::Fps => &mut self.scene.camera.theta,
        };
        angles[RotationPlane::Xz.index()] -= dx;
        angles[RotationPlane::Yz.index()] -= dy;
    }

    pub fn project(&mut self) -> &[Segment] {
        self.segments = project_scene(&self.scene);
        &self.segments
    }

    pub fn segment_color(&self, segment: &Segment) -> [f32; 4] {
        fourd_color(segment.mean_ana(), self.scene.scene.color_max)
    }

    /// Remember an error for the status bar
    pub fn report(&mut self, error: ViewerError) {
        tracing::error!("{error}");
        self.last_error = Some(error.to_string());
    }
}
