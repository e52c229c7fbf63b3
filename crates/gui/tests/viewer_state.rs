//! Integration tests for the headless viewer state.

use std::collections::HashSet;

use anaview_gui_lib::keymap::held_controls;
use anaview_gui_lib::state::{SceneSource, ViewerSettings, ViewerState};
use anaview_gui_lib::ViewerError;
use egui::{Key, Modifiers};
use shared::CameraType;

fn viewer(last_scene: Option<&str>) -> ViewerState {
    ViewerState::new(ViewerSettings {
        last_scene: last_scene.map(str::to_string),
        ..ViewerSettings::default()
    })
}

#[test]
fn test_starts_with_last_scene() {
    let state = viewer(Some("town"));
    assert_eq!(state.source, SceneSource::Preset("town".to_string()));
    assert_eq!(state.scene.scene.cam_type, CameraType::Fps);
}

#[test]
fn test_unknown_last_scene_falls_back() {
    let state = viewer(Some("atlantis"));
    assert_eq!(state.source, SceneSource::Preset("hypercube".to_string()));
}

#[test]
fn test_load_preset_remembers_choice() {
    let mut state = viewer(None);
    state.load_preset("fivecell").unwrap();
    assert_eq!(state.settings.last_scene.as_deref(), Some("fivecell"));
    assert_eq!(state.scene.scene.node_count(), 5);

    assert!(matches!(state.load_preset("nope"), Err(ViewerError::Field(_))));
    assert_eq!(state.source, SceneSource::Preset("fivecell".to_string()));
}

#[test]
fn test_held_keys_drive_free_camera() {
    let mut state = viewer(Some("world"));
    state.animate = false;
    let start = state.scene.camera.position;

    let keys: HashSet<Key> = [Key::W, Key::R].into_iter().collect();
    let controls = held_controls(&keys, Modifiers::NONE);
    state.step(&controls, 0.5);

    let moved = state.scene.camera.position;
    let speed = state.settings.controls.move_sensitivity;
    assert!((moved[2] - (start[2] + speed * 0.5)).abs() < 1e-9);
    assert!((moved[3] - (start[3] + speed * 0.5)).abs() < 1e-9);
}

#[test]
fn test_single_mode_turns_shape() {
    let mut state = viewer(Some("hypercube"));
    state.animate = false;
    let camera = state.scene.camera.clone();

    state.drag_rotate(0.2, 0.0);
    let keys: HashSet<Key> = [Key::Insert].into_iter().collect();
    state.step(&held_controls(&keys, Modifiers::NONE), 1.0);

    assert_eq!(state.scene.camera, camera);
    let orientation = state.scene.scene.shapes[&0].orientation;
    assert_eq!(orientation[2], -0.2);
    assert_eq!(orientation[3], state.settings.controls.rotate_sensitivity);
}

#[test]
fn test_project_and_colors() {
    let mut state = viewer(Some("hypercube"));
    state.set_viewport_size(800.0, 600.0);
    assert_eq!(state.project().len(), 32);
    for segment in &state.segments {
        let color = state.segment_color(segment);
        assert_eq!(color[3], 1.0);
    }
}

#[test]
fn test_reset_camera_keeps_aspect() {
    let mut state = viewer(Some("world"));
    state.set_viewport_size(1000.0, 500.0);
    state.drag_rotate(1.0, 1.0);
    state.reset_camera();
    assert_eq!(state.scene.camera.theta, state.scene.scene.cam_start.theta);
    assert_eq!(state.scene.camera.aspect, 2.0);
}

#[test]
fn test_save_then_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.json");

    let mut state = viewer(Some("cube"));
    state.scene.camera.position = [1.0, 2.0, -6.0, 0.5];
    state.save_file(&path).unwrap();

    let mut other = viewer(None);
    other.load_file(&path).unwrap();
    assert_eq!(other.source, SceneSource::File(path.clone()));
    assert_eq!(other.source.label(), "cube.json");
    assert_eq!(other.scene.camera.position, [1.0, 2.0, -6.0, 0.5]);
    assert_eq!(other.scene.scene.name, "cube");
}

#[test]
fn test_load_invalid_file_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut state = viewer(None);
    let err = state.load_file(&path).unwrap_err();
    assert!(matches!(err, ViewerError::Json(_)));
    state.report(err);
    assert!(state.last_error.is_some());
    assert_eq!(state.source, SceneSource::Preset("hypercube".to_string()));
}
