use std::collections::HashSet;

use glam::DVec4;
use serde::{Deserialize, Serialize};

pub mod camera;
pub mod clipping;
pub mod error;
pub mod field;
pub mod input;
pub mod scenes;
pub mod shape_maker;
pub mod transforms;
pub mod util;
pub mod wireframe;

pub use camera::{Camera, CameraType, MoveDirection};
pub use clipping::Point2D;
pub use error::GeometryError;
pub use field::{FieldError, FieldExpr, TerrainSpec};
pub use input::Control;
pub use scenes::{Scene, SceneState};
pub use transforms::RotationPlane;
pub use wireframe::Segment;

/// Идентификатор узла внутри фигуры
pub type NodeId = i32;

/// Идентификатор фигуры внутри сцены
pub type ShapeId = u32;

/// Узел — точка в 4D-пространстве.
///
/// `x`, `y`, `z` — обычные координаты, `a` — координата вдоль четвёртой оси
/// (ана/ката). Узел неизменяем: «сдвинуть» узел значит построить новый.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    x: f64,
    y: f64,
    z: f64,
    a: f64,
    id: NodeId,
}

impl Node {
    pub const fn new(x: f64, y: f64, z: f64, a: f64, id: NodeId) -> Self {
        Self { x, y, z, a, id }
    }

    pub fn from_vec(p: DVec4, id: NodeId) -> Self {
        Self::new(p.x, p.y, p.z, p.w, id)
    }

    pub const fn x(&self) -> f64 {
        self.x
    }

    pub const fn y(&self) -> f64 {
        self.y
    }

    pub const fn z(&self) -> f64 {
        self.z
    }

    pub const fn a(&self) -> f64 {
        self.a
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Координаты в виде 4-вектора (a → w)
    pub fn to_vec(&self) -> DVec4 {
        DVec4::new(self.x, self.y, self.z, self.a)
    }

    /// Копия узла, сдвинутая на `offset`, с новым идентификатором
    pub fn translated(&self, offset: [f64; 4], id: NodeId) -> Self {
        Self::from_vec(self.to_vec() + DVec4::from_array(offset), id)
    }
}

/// Ребро — пара идентификаторов узлов.
///
/// Ссылочная целостность не проверяется: см. [`Shape::dangling_edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    node1: NodeId,
    node2: NodeId,
}

impl Edge {
    pub const fn new(node1: NodeId, node2: NodeId) -> Self {
        Self { node1, node2 }
    }

    pub const fn node1(&self) -> NodeId {
        self.node1
    }

    pub const fn node2(&self) -> NodeId {
        self.node2
    }

    /// Ребро с идентификаторами, сдвинутыми на `offset`; при переполнении
    /// идентификаторы заворачиваются
    pub const fn shifted(&self, offset: NodeId) -> Self {
        Self::new(
            self.node1.wrapping_add(offset),
            self.node2.wrapping_add(offset),
        )
    }
}

fn default_scale() -> f64 {
    1.0
}

/// Каркасная фигура: узлы в локальных координатах, рёбра, грани и
/// положение/ориентация в мире.
///
/// Углы `orientation` и `rotation_speed` заданы в шести плоскостях вращения
/// в порядке `xy, yz, xz, xa, ya, za` (см. [`RotationPlane`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Индексы вершин для каждой грани
    #[serde(default)]
    pub faces_vert: Vec<Vec<NodeId>>,
    pub position: [f64; 4],
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub orientation: [f64; 6],
    #[serde(default)]
    pub rotation_speed: [f64; 6],
}

impl Shape {
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        faces_vert: Vec<Vec<NodeId>>,
        position: [f64; 4],
        orientation: [f64; 6],
        rotation_speed: [f64; 6],
    ) -> Self {
        Self {
            nodes,
            edges,
            faces_vert,
            position,
            scale: 1.0,
            orientation,
            rotation_speed,
        }
    }

    /// Найти узел по идентификатору
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Рёбра, у которых хотя бы один конец не найден среди узлов
    pub fn dangling_edges(&self) -> Vec<Edge> {
        let ids: HashSet<NodeId> = self.nodes.iter().map(Node::id).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(&e.node1()) || !ids.contains(&e.node2()))
            .copied()
            .collect()
    }

    /// Общее число вершин во всех гранях (у куба: 6 граней × 4 вершины)
    pub fn num_face_verts(&self) -> usize {
        self.faces_vert.iter().map(Vec::len).sum()
    }

    /// Разбить грани на треугольники.
    ///
    /// Индексы — не id узлов, а позиции в общем списке вершин граней, в том
    /// порядке, в каком они попадают в индексный буфер.
    pub fn make_tris(&self) -> Result<Vec<u32>, GeometryError> {
        let mut result = Vec::with_capacity(self.num_face_verts() * 2);
        let mut current: u32 = 0;

        for (index, face) in self.faces_vert.iter().enumerate() {
            match face.len() {
                3 => result.extend([current, current + 1, current + 2]),
                4 => result.extend([
                    current,
                    current + 1,
                    current + 2,
                    current,
                    current + 2,
                    current + 3,
                ]),
                len if len < 3 => return Err(GeometryError::DegenerateFace { index, len }),
                len => return Err(GeometryError::UnsupportedFace { index, len }),
            }
            current += face.len() as u32;
        }

        Ok(result)
    }

    /// Повернуть фигуру согласно скорости вращения за `dt` секунд
    pub fn advance(&mut self, dt: f64) {
        for (angle, speed) in self.orientation.iter_mut().zip(self.rotation_speed) {
            *angle += speed * dt;
        }
    }

    /// Присоединить другую фигуру, сдвинув её узлы на `offset`.
    ///
    /// Идентификаторы узлов `other` сдвигаются на число узлов этой фигуры;
    /// положение и ориентация `other` игнорируются.
    pub fn merge(&mut self, other: Shape, offset: [f64; 4]) {
        let base = self.nodes.len() as NodeId;

        self.nodes.extend(
            other
                .nodes
                .iter()
                .map(|n| n.translated(offset, n.id().wrapping_add(base))),
        );
        self.edges
            .extend(other.edges.iter().map(|e| e.shifted(base)));
        self.faces_vert.extend(
            other
                .faces_vert
                .into_iter()
                .map(|face| face.into_iter().map(|v| v.wrapping_add(base)).collect()),
        );
    }

    /// Ограничивающий 4D-бокс узлов в локальных координатах
    pub fn bounds(&self) -> Option<([f64; 4], [f64; 4])> {
        let first = self.nodes.first()?.to_vec();
        let (min, max) = self
            .nodes
            .iter()
            .skip(1)
            .fold((first, first), |(min, max), n| {
                let p = n.to_vec();
                (min.min(p), max.max(p))
            });
        Some((min.to_array(), max.to_array()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).unwrap();
        let back: T = serde_json::from_str(&json).unwrap();
        assert_eq!(*val, back);
    }

    fn triangle() -> Shape {
        Shape::new(
            vec![
                Node::new(0.0, 0.0, 0.0, 0.0, 0),
                Node::new(1.0, 0.0, 0.0, 0.0, 1),
                Node::new(0.0, 1.0, 0.0, 2.0, 2),
            ],
            vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)],
            vec![vec![0, 1, 2]],
            [0.0; 4],
            [0.0; 6],
            [0.0; 6],
        )
    }

    #[test]
    fn test_node_fields() {
        let node = Node::new(0.0, 1.0, 2.0, 0.5, 7);
        assert_eq!(node.x(), 0.0);
        assert_eq!(node.y(), 1.0);
        assert_eq!(node.z(), 2.0);
        assert_eq!(node.a(), 0.5);
        assert_eq!(node.id(), 7);
    }

    #[test]
    fn test_edge_fields() {
        let edge = Edge::new(7, 8);
        assert_eq!(edge.node1(), 7);
        assert_eq!(edge.node2(), 8);
    }

    #[test]
    fn test_node_translated_is_new_value() {
        let node = Node::new(1.0, 2.0, 3.0, 4.0, 0);
        let moved = node.translated([1.0, 1.0, 1.0, 1.0], 5);
        assert_eq!(node, Node::new(1.0, 2.0, 3.0, 4.0, 0));
        assert_eq!(moved, Node::new(2.0, 3.0, 4.0, 5.0, 5));
    }

    #[test]
    fn test_edge_allows_self_loop_and_unknown_ids() {
        let edge = Edge::new(3, 3);
        assert_eq!(edge.node1(), edge.node2());
        let shape = Shape::new(vec![], vec![Edge::new(0, 1)], vec![], [0.0; 4], [0.0; 6], [0.0; 6]);
        assert_eq!(shape.dangling_edges(), vec![Edge::new(0, 1)]);
    }

    #[test]
    fn test_node_serde() {
        roundtrip(&Node::new(0.0, 1.0, 2.0, 0.5, 7));
        let json = serde_json::to_string(&Node::new(0.0, 1.0, 2.0, 0.5, 7)).unwrap();
        assert_eq!(json, r#"{"x":0.0,"y":1.0,"z":2.0,"a":0.5,"id":7}"#);
    }

    #[test]
    fn test_edge_serde() {
        let json = serde_json::to_string(&Edge::new(7, 8)).unwrap();
        assert_eq!(json, r#"{"node1":7,"node2":8}"#);
    }

    #[test]
    fn test_shape_defaults_from_json() {
        let json = r#"{
            "nodes": [{"x":0.0,"y":0.0,"z":0.0,"a":0.0,"id":0}],
            "edges": [],
            "position": [1.0, 2.0, 3.0, 4.0]
        }"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.scale, 1.0);
        assert_eq!(shape.orientation, [0.0; 6]);
        assert!(shape.faces_vert.is_empty());
        roundtrip(&shape);
    }

    #[test]
    fn test_make_tris() {
        let mut shape = triangle();
        shape.faces_vert.push(vec![0, 1, 2, 0]);
        assert_eq!(shape.make_tris().unwrap(), vec![0, 1, 2, 3, 4, 5, 3, 5, 6]);
        assert_eq!(shape.num_face_verts(), 7);
    }

    #[test]
    fn test_make_tris_rejects_bad_faces() {
        let mut shape = triangle();
        shape.faces_vert = vec![vec![0, 1]];
        assert_eq!(
            shape.make_tris(),
            Err(GeometryError::DegenerateFace { index: 0, len: 2 })
        );

        shape.faces_vert = vec![vec![0, 1, 2], vec![0, 1, 2, 0, 1]];
        assert_eq!(
            shape.make_tris(),
            Err(GeometryError::UnsupportedFace { index: 1, len: 5 })
        );
    }

    #[test]
    fn test_advance() {
        let mut shape = triangle();
        shape.rotation_speed = [1.0, 0.0, 0.0, 0.5, 0.0, -2.0];
        shape.advance(0.5);
        assert_eq!(shape.orientation, [0.5, 0.0, 0.0, 0.25, 0.0, -1.0]);
    }

    #[test]
    fn test_merge_shifts_ids_and_positions() {
        let mut base = triangle();
        base.merge(triangle(), [0.0, 1.0, 0.0, 0.0]);

        assert_eq!(base.nodes.len(), 6);
        assert_eq!(base.edges.len(), 6);
        assert_eq!(base.edges[3], Edge::new(3, 4));
        assert_eq!(base.faces_vert[1], vec![3, 4, 5]);
        assert_eq!(base.node(5), Some(&Node::new(0.0, 2.0, 0.0, 2.0, 5)));
        assert!(base.dangling_edges().is_empty());
    }

    #[test]
    fn test_merge_wraps_large_ids() {
        let edge = Edge::new(NodeId::MAX, NodeId::MAX - 1);
        assert_eq!(edge.shifted(2), Edge::new(NodeId::MIN + 1, NodeId::MIN));

        let mut base = triangle();
        let far = Shape::new(
            vec![
                Node::new(0.0, 0.0, 0.0, 0.0, NodeId::MAX),
                Node::new(1.0, 0.0, 0.0, 0.0, NodeId::MAX - 1),
            ],
            vec![Edge::new(NodeId::MAX, NodeId::MAX - 1)],
            vec![],
            [0.0; 4],
            [0.0; 6],
            [0.0; 6],
        );
        base.merge(far, [0.0; 4]);

        assert_eq!(base.edges[3], Edge::new(NodeId::MIN + 2, NodeId::MIN + 1));
        assert!(base.dangling_edges().is_empty());
    }

    #[test]
    fn test_dangling_edges_on_long_chain() {
        let count = 30_000;
        let nodes = (0..count)
            .map(|i| Node::new(f64::from(i), 0.0, 0.0, 0.0, i))
            .collect();
        let mut edges: Vec<Edge> = (1..count).map(|i| Edge::new(i - 1, i)).collect();
        edges.push(Edge::new(count - 1, count));
        let shape = Shape::new(nodes, edges, vec![], [0.0; 4], [0.0; 6], [0.0; 6]);

        assert_eq!(shape.dangling_edges(), vec![Edge::new(count - 1, count)]);
    }

    #[test]
    fn test_bounds() {
        let shape = triangle();
        assert_eq!(
            shape.bounds(),
            Some(([0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 0.0, 2.0]))
        );

        let empty = Shape::new(vec![], vec![], vec![], [0.0; 4], [0.0; 6], [0.0; 6]);
        assert_eq!(empty.bounds(), None);
    }
}
