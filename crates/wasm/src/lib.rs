use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::scenes::preset;
use shared::shape_maker::make_named;
use shared::wireframe::{fourd_color, project_scene};
use shared::{Camera, Scene, SceneState, Segment};

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Парсит сцену из JSON и проверяет её
fn load_scene(scene_json: &str) -> Result<Scene, String> {
    let scene: Scene = serde_json::from_str(scene_json).map_err(|e| e.to_string())?;
    scene.validate().map_err(|e| e.to_string())?;
    Ok(scene)
}

/// Пустая строка означает стартовую камеру сцены
fn load_state(scene_json: &str, camera_json: &str) -> Result<SceneState, String> {
    let mut state = SceneState::new(load_scene(scene_json)?);
    if !camera_json.trim().is_empty() {
        let camera: Camera = serde_json::from_str(camera_json).map_err(|e| e.to_string())?;
        camera.validate().map_err(|e| e.to_string())?;
        state.camera = camera;
    }
    Ok(state)
}

fn flatten_segments(segments: &[Segment]) -> Vec<f64> {
    segments
        .iter()
        .flat_map(|s| [s.start.x, s.start.y, s.end.x, s.end.y])
        .collect()
}

fn flatten_colors(segments: &[Segment], color_max: f64) -> Vec<f32> {
    segments
        .iter()
        .flat_map(|s| fourd_color(s.mean_ana(), color_max))
        .collect()
}

#[derive(Serialize)]
struct SceneSummary<'a> {
    name: &'a str,
    cam_type: shared::CameraType,
    shapes: usize,
    nodes: usize,
    edges: usize,
}

fn summarize(scene: &Scene) -> Result<String, String> {
    let summary = SceneSummary {
        name: &scene.name,
        cam_type: scene.cam_type,
        shapes: scene.shapes.len(),
        nodes: scene.node_count(),
        edges: scene.edge_count(),
    };
    serde_json::to_string(&summary).map_err(|e| e.to_string())
}

#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"anaview-wasm loaded".into());
}

/// Предустановленная сцена в JSON
#[wasm_bindgen]
pub fn preset_scene(name: &str) -> Result<String, JsError> {
    let scene = preset(name).map_err(js_err)?;
    serde_json::to_string(&scene).map_err(js_err)
}

/// Одна фигура (`cube`, `hypercube`, `5cell`, …) в JSON
#[wasm_bindgen]
pub fn shape(kind: &str, size: f64) -> Result<String, JsError> {
    let shape = make_named(kind, size).map_err(js_err)?;
    serde_json::to_string(&shape).map_err(js_err)
}

/// Видимые рёбра в NDC: `x0, y0, x1, y1` подряд для каждого отрезка
#[wasm_bindgen]
pub fn project(scene_json: &str, camera_json: &str) -> Result<js_sys::Float64Array, JsError> {
    let state = load_state(scene_json, camera_json).map_err(js_err)?;
    let flat = flatten_segments(&project_scene(&state));
    Ok(js_sys::Float64Array::from(flat.as_slice()))
}

/// Цвета отрезков из [`project`]: `r, g, b, a` подряд
#[wasm_bindgen]
pub fn segment_colors(scene_json: &str, camera_json: &str) -> Result<js_sys::Float32Array, JsError> {
    let state = load_state(scene_json, camera_json).map_err(js_err)?;
    let colors = flatten_colors(&project_scene(&state), state.scene.color_max);
    Ok(js_sys::Float32Array::from(colors.as_slice()))
}

/// Краткая сводка по сцене
#[wasm_bindgen]
pub fn scene_info(scene_json: &str) -> Result<String, JsError> {
    let scene = load_scene(scene_json).map_err(js_err)?;
    summarize(&scene).map_err(js_err)
}
