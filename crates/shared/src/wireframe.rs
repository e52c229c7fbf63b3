//! Wireframe projection: positions every shape, moves it into camera space,
//! clips and projects each edge to a 2D segment in NDC.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::clipping::{clip_2d, clip_near, ClipWindow};
use crate::transforms::{position_shape, view_matrix};
use crate::{Camera, NodeId, Point2D, SceneState, Shape, ShapeId};

/// Видимый отрезок ребра в NDC.
///
/// `ana` — смещение концов по ана относительно камеры, `depth` — глубина
/// концов в NDC; оба берутся после отсечения ближней плоскостью.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub shape_id: ShapeId,
    pub start: Point2D,
    pub end: Point2D,
    pub ana: [f64; 2],
    pub depth: [f64; 2],
}

impl Segment {
    /// Среднее смещение по ана; по нему красится отрезок целиком
    pub fn mean_ana(&self) -> f64 {
        (self.ana[0] + self.ana[1]) / 2.0
    }
}

pub fn project_scene(state: &SceneState) -> Vec<Segment> {
    project_shapes(&state.camera, &state.scene.shapes)
}

pub fn project_shapes(camera: &Camera, shapes: &BTreeMap<ShapeId, Shape>) -> Vec<Segment> {
    let view = view_matrix(camera);
    let cam_position = glam::DVec4::from_array(camera.position);
    let projector = camera.projector();
    let mut segments = Vec::new();

    for (&shape_id, shape) in shapes {
        // При повторе id берётся первый узел, как в `Shape::node`
        let mut viewed: HashMap<NodeId, glam::DVec4> = HashMap::with_capacity(shape.nodes.len());
        for (id, world) in position_shape(shape) {
            viewed
                .entry(id)
                .or_insert_with(|| view * (world - cam_position));
        }

        for edge in &shape.edges {
            let (Some(&a), Some(&b)) = (viewed.get(&edge.node1()), viewed.get(&edge.node2())) else {
                tracing::debug!(
                    shape_id,
                    node1 = edge.node1(),
                    node2 = edge.node2(),
                    "Skipping edge with a missing node"
                );
                continue;
            };

            let Some((a, b)) = clip_near(a, b, camera.near) else {
                continue;
            };
            let (Some(pa), Some(pb)) = (projector.project(a), projector.project(b)) else {
                continue;
            };

            if let Some((start, end)) = clip_2d(
                Point2D::new(pa.x, pa.y),
                Point2D::new(pb.x, pb.y),
                &ClipWindow::NDC,
            ) {
                segments.push(Segment {
                    shape_id,
                    start,
                    end,
                    ana: [a.w, b.w],
                    depth: [pa.z, pb.z],
                });
            }
        }
    }

    segments
}

const NEUTRAL: [f32; 3] = [0.85, 0.85, 0.85];
const KATA_COLOR: [f32; 3] = [0.15, 0.35, 1.0];
const ANA_COLOR: [f32; 3] = [1.0, 0.2, 0.15];

/// Цвет по смещению вдоль ана относительно камеры.
///
/// Точки на стороне ката синеют, на стороне ана краснеют; насыщенность
/// растёт до `|offset| = color_max`.
pub fn fourd_color(ana_offset: f64, color_max: f64) -> [f32; 4] {
    let portion = if color_max > 0.0 {
        (ana_offset.abs() / color_max).min(1.0)
    } else if ana_offset != 0.0 {
        1.0
    } else {
        0.0
    } as f32;

    let target = if ana_offset < 0.0 { KATA_COLOR } else { ANA_COLOR };
    let mix = |i: usize| NEUTRAL[i] + (target[i] - NEUTRAL[i]) * portion;
    [mix(0), mix(1), mix(2), 1.0]
}

/// NDC → пиксели экрана размером `width × height` (y вниз)
pub fn to_screen(p: Point2D, width: f64, height: f64) -> Point2D {
    Point2D::new((p.x + 1.0) / 2.0 * width, (1.0 - p.y) / 2.0 * height)
}
