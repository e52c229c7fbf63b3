//! Scenes: a set of shapes plus a starting camera, and the preset scenes
//! shipped with the viewer.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::field::{FieldError, TerrainSpec};
use crate::shape_maker::{
    make_5cell, make_box, make_cube, make_house, make_hypercube, make_hypergrid,
    make_rectangular_pyramid,
};
use crate::{Camera, CameraType, GeometryError, Shape, ShapeId};

const ZERO4: [f64; 4] = [0.0; 4];
const ZERO6: [f64; 6] = [0.0; 6];

fn default_color_max() -> f64 {
    10.0
}

/// Сцена: фигуры, стартовая камера и режим управления
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub shapes: BTreeMap<ShapeId, Shape>,
    pub cam_start: Camera,
    #[serde(default)]
    pub cam_type: CameraType,
    /// Расстояние по ана, на котором цвет достигает максимума
    #[serde(default = "default_color_max")]
    pub color_max: f64,
}

impl Scene {
    pub fn from_shapes(id: u32, name: &str, shapes: Vec<Shape>, cam_start: Camera) -> Self {
        Self {
            id,
            name: name.to_string(),
            shapes: shapes
                .into_iter()
                .enumerate()
                .map(|(i, s)| (i as ShapeId, s))
                .collect(),
            cam_start,
            cam_type: CameraType::Free,
            color_max: default_color_max(),
        }
    }

    /// Проверить камеру, порог цвета и ссылочную целостность рёбер
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.cam_start.validate()?;
        if !(self.color_max > 0.0) {
            return Err(GeometryError::ColorMax(self.color_max));
        }
        for (id, shape) in &self.shapes {
            if let Some(edge) = shape.dangling_edges().first() {
                return Err(GeometryError::DanglingEdge {
                    shape: *id,
                    node1: edge.node1(),
                    node2: edge.node2(),
                });
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.shapes.values().map(|s| s.nodes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.shapes.values().map(|s| s.edges.len()).sum()
    }
}

/// Живое состояние сцены: текущая камера и вращающиеся фигуры
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub scene: Scene,
    pub camera: Camera,
}

impl SceneState {
    pub fn new(scene: Scene) -> Self {
        let camera = scene.cam_start.clone();
        Self { scene, camera }
    }

    /// Продвинуть анимацию на `dt` секунд
    pub fn tick(&mut self, dt: f64) {
        for shape in self.scene.shapes.values_mut() {
            shape.advance(dt);
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = self.scene.cam_start.clone();
    }
}

// ============================================================================
// Предустановленные сцены
// ============================================================================

pub const PRESET_NAMES: [&str; 7] = [
    "hypercube",
    "fivecell",
    "cube",
    "world",
    "town",
    "grid",
    "grid_warped",
];

pub fn preset_names() -> &'static [&'static str] {
    &PRESET_NAMES
}

/// Построить предустановленную сцену по имени
pub fn preset(name: &str) -> Result<Scene, FieldError> {
    match name {
        "hypercube" => Ok(hypercube_scene()),
        "fivecell" => Ok(fivecell_scene()),
        "cube" => Ok(cube_scene()),
        "world" => world_scene(),
        "town" => town_scene(),
        "grid" => grid_scene(),
        "grid_warped" => grid_warped_scene(),
        other => Err(GeometryError::UnknownScene(other.to_string()).into()),
    }
}

fn single_scene(id: u32, name: &str, shape: Shape) -> Scene {
    let mut scene = Scene::from_shapes(
        id,
        name,
        vec![shape],
        Camera {
            position: [0.0, 0.0, -3.0, 0.0],
            fov: TAU / 5.5,
            ..Camera::default()
        },
    );
    scene.cam_type = CameraType::Single;
    scene.color_max = 0.4;
    scene
}

pub fn hypercube_scene() -> Scene {
    single_scene(0, "hypercube", make_hypercube(1.0, ZERO4, ZERO6, ZERO6))
}

pub fn fivecell_scene() -> Scene {
    single_scene(1, "fivecell", make_5cell(2.0, ZERO4, ZERO6, ZERO6))
}

pub fn cube_scene() -> Scene {
    single_scene(2, "cube", make_cube(1.0, ZERO4, ZERO6, ZERO6))
}

pub fn world_scene() -> Result<Scene, FieldError> {
    let terrain = TerrainSpec {
        dims: [200.0, 200.0],
        res: 20,
        height: "2 * math::sin(x / 15) * math::cos(z / 15) - 3".to_string(),
        spissitude: "z / 40".to_string(),
    }
    .build(ZERO4)?;

    let shapes = vec![
        terrain,
        make_box([1.0, 2.0, 1.0], [-1.0, 3.0, 4.0, 1.0], ZERO6, ZERO6),
        make_rectangular_pyramid(
            [2.0, 1.0, 2.0],
            [-2.0, 3.0, 3.0, -1.0],
            [TAU / 6.0, TAU / 3.0, 0.0, 0.0, 0.0, 0.0],
            ZERO6,
        ),
        make_cube(1.0, [2.0, 0.0, 5.0, 2.0], ZERO6, [0.12, 0.0, 0.0, 0.0, 0.0, 0.0]),
        // Тот же куб, но дальше по ана
        make_cube(1.0, [2.0, 0.0, 5.0, 10.0], ZERO6, [0.12, 0.0, 0.0, 0.0, 0.0, 0.0]),
        make_hypercube(1.0, [3.0, 3.0, 3.0, 0.0], ZERO6, [0.0, 0.0, 0.0, 0.12, 0.03, 0.06]),
        make_hypercube(1.0, [-3.0, 1.0, 0.0, 1.5], ZERO6, ZERO6),
    ];

    Ok(Scene::from_shapes(
        3,
        "world",
        shapes,
        Camera {
            position: [0.0, 2.0, -3.0, 0.0],
            fov: TAU / 4.0,
            ..Camera::default()
        },
    ))
}

pub fn town_scene() -> Result<Scene, FieldError> {
    let mut shapes = vec![TerrainSpec::flat([1000.0, 1000.0], 10).build(ZERO4)?];

    for x in [-8.0, 8.0] {
        for a in [-2.0, 2.0] {
            for z in [0.0, 12.0, 24.0, 36.0] {
                shapes.push(make_house([4.0, 4.0, 4.0], [x, 2.0, z, a], ZERO6, ZERO6));
            }
        }
    }

    let mut scene = Scene::from_shapes(
        4,
        "town",
        shapes,
        Camera {
            position: [0.0, 2.0, -8.0, 0.0],
            fov: TAU / 5.5,
            ..Camera::default()
        },
    );
    scene.cam_type = CameraType::Fps;
    Ok(scene)
}

fn grid_camera() -> Camera {
    Camera {
        position: [0.0, 0.0, -15.0, 0.0],
        fov: TAU / 4.0,
        far: 1000.0,
        ..Camera::default()
    }
}

pub fn grid_scene() -> Result<Scene, FieldError> {
    let res = 8;
    let map = vec![vec![vec![0.0; res]; res]; res];
    let shapes = make_hypergrid([20.0, 20.0, 20.0], res, &map, ZERO4)?;

    let mut scene = Scene::from_shapes(5, "grid", shapes, grid_camera());
    scene.color_max = 30.0;
    Ok(scene)
}

pub fn grid_warped_scene() -> Result<Scene, FieldError> {
    let flat = vec![vec![0.0; 8]; 8];
    let warped: Vec<Vec<f64>> = vec![
        vec![1.0, 1.5, 1.5, 1.5, 1.5, 0.0, 0.0, 0.0],
        vec![1.5, 2.0, 2.5, 2.0, 1.0, 1.0, 0.0, 0.0],
        vec![1.0, 2.5, 3.0, 2.5, 2.0, 1.0, 0.0, 0.0],
        vec![1.5, 2.0, 2.5, 2.0, 1.5, 0.0, 0.0, 0.0],
        vec![1.0, 1.5, 1.5, 1.5, 1.0, 0.0, 0.0, 0.0],
        vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0; 8],
        vec![0.0; 8],
    ];
    let map = vec![
        flat.clone(),
        warped.clone(),
        warped.clone(),
        flat.clone(),
        flat.clone(),
        warped.clone(),
        warped,
        flat,
    ];
    let shapes = make_hypergrid([20.0, 20.0, 20.0], 8, &map, ZERO4)?;

    let mut scene = Scene::from_shapes(6, "grid_warped", shapes, grid_camera());
    scene.color_max = 3.0;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_build_and_validate() {
        for name in preset_names() {
            let scene = preset(name).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(scene.name, *name);
            assert!(!scene.shapes.is_empty());
            scene.validate().unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!(
            preset("nope").unwrap_err(),
            FieldError::Geometry(GeometryError::UnknownScene("nope".to_string()))
        );
    }

    #[test]
    fn test_preset_ids_are_unique() {
        let mut ids: Vec<u32> = preset_names()
            .iter()
            .map(|n| preset(n).unwrap().id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PRESET_NAMES.len());
    }

    #[test]
    fn test_town_layout() {
        let town = town_scene().unwrap();
        assert_eq!(town.shapes.len(), 17);
        assert_eq!(town.cam_type, CameraType::Fps);
    }

    #[test]
    fn test_scene_serde_roundtrip() {
        let scene = hypercube_scene();
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(scene, back);
        assert!(json.contains(r#""cam_type":"single""#));
    }

    #[test]
    fn test_validate_reports_dangling_edge() {
        let mut scene = cube_scene();
        scene
            .shapes
            .get_mut(&0)
            .unwrap()
            .edges
            .push(crate::Edge::new(3, 42));
        assert_eq!(
            scene.validate(),
            Err(GeometryError::DanglingEdge {
                shape: 0,
                node1: 3,
                node2: 42
            })
        );
    }

    #[test]
    fn test_validate_color_max() {
        let mut scene = cube_scene();
        scene.color_max = 0.0;
        assert_eq!(scene.validate(), Err(GeometryError::ColorMax(0.0)));
    }

    #[test]
    fn test_tick_and_reset() {
        let mut state = SceneState::new(world_scene().unwrap());
        state.tick(2.0);
        assert!((state.scene.shapes[&3].orientation[0] - 0.24).abs() < 1e-12);
        assert_eq!(state.scene.shapes[&1].orientation, ZERO6);

        state.camera.position[0] = 50.0;
        state.reset_camera();
        assert_eq!(state.camera, state.scene.cam_start);
    }

    #[test]
    fn test_counts() {
        let scene = hypercube_scene();
        assert_eq!(scene.node_count(), 16);
        assert_eq!(scene.edge_count(), 32);
    }
}
