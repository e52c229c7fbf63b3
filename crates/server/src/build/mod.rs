use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::wireframe::{fourd_color, project_scene};
use shared::{Camera, GeometryError, Scene, SceneState, Segment};

/// Тело `POST /api/project`: либо сцена целиком, либо её id
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub scene: Option<Scene>,
    #[serde(default)]
    pub scene_id: Option<String>,
    /// Камера вместо стартовой камеры сцены
    #[serde(default)]
    pub camera: Option<Camera>,
    /// Сколько секунд анимации прокрутить перед проекцией
    #[serde(default)]
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoredSegment {
    #[serde(flatten)]
    pub segment: Segment,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub name: String,
    pub camera: Camera,
    pub color_max: f64,
    pub segments: Vec<ColoredSegment>,
}

/// Scene → wireframe segments as seen from `camera` after `time` seconds
pub fn project_wireframe(
    scene: Scene,
    camera: Option<Camera>,
    time: f64,
) -> Result<ProjectResponse, GeometryError> {
    scene.validate()?;
    if let Some(cam) = &camera {
        cam.validate()?;
    }

    let color_max = scene.color_max;
    let mut state = SceneState::new(scene);
    if let Some(cam) = camera {
        state.camera = cam;
    }
    state.tick(time);

    let segments = project_scene(&state)
        .into_iter()
        .map(|segment| ColoredSegment {
            color: fourd_color(segment.mean_ana(), color_max),
            segment,
        })
        .collect::<Vec<_>>();
    tracing::debug!(scene = %state.scene.name, segments = segments.len(), "Projected scene");

    Ok(ProjectResponse {
        name: state.scene.name,
        camera: state.camera,
        color_max,
        segments,
    })
}

/// Scene → JSON metrics
pub fn inspect_scene(scene: &Scene) -> Value {
    let shapes: Vec<Value> = scene
        .shapes
        .iter()
        .map(|(id, shape)| {
            let bounds = shape
                .bounds()
                .map(|(min, max)| json!({ "min": min, "max": max }));
            json!({
                "id": id,
                "nodes": shape.nodes.len(),
                "edges": shape.edges.len(),
                "faces": shape.faces_vert.len(),
                "dangling_edges": shape.dangling_edges().len(),
                "position": shape.position,
                "bounds": bounds,
            })
        })
        .collect();

    let error = scene.validate().err().map(|e| e.to_string());

    json!({
        "name": scene.name,
        "cam_type": scene.cam_type,
        "nodes": scene.node_count(),
        "edges": scene.edge_count(),
        "shapes": shapes,
        "valid": error.is_none(),
        "error": error,
    })
}
