//! Ошибки построения и проверки 4D-геометрии

use thiserror::Error;

use crate::NodeId;

/// Ошибки при построении фигур, сцен и камер
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Грань с числом вершин меньше трёх
    #[error("Face {index} has {len} vertices; faces need at least 3")]
    DegenerateFace { index: usize, len: usize },

    /// Грань с числом вершин больше четырёх
    #[error("Face {index} has {len} vertices; only triangles and quads are supported")]
    UnsupportedFace { index: usize, len: usize },

    /// Карта высот/spissitude не совпадает с разрешением сетки
    #[error("{map} has length {found} along an axis, expected {expected}")]
    MapShape {
        map: &'static str,
        expected: usize,
        found: usize,
    },

    /// В карте встретилось NaN
    #[error("Missing value in {map} at {index:?}")]
    MissingValue { map: &'static str, index: Vec<usize> },

    /// Слишком мелкая сетка
    #[error("Grid resolution must be at least {min}, got {got}")]
    Resolution { min: usize, got: usize },

    /// Неверные параметры камеры
    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    /// Порог цвета по ана должен быть положительным
    #[error("color_max must be positive, got {0}")]
    ColorMax(f64),

    /// Ребро ссылается на несуществующий узел
    #[error("Shape {shape} has an edge {node1} -> {node2} with a missing node")]
    DanglingEdge {
        shape: u32,
        node1: NodeId,
        node2: NodeId,
    },

    /// Неизвестная предустановленная сцена
    #[error("Unknown scene '{0}'")]
    UnknownScene(String),

    /// Неизвестный тип фигуры
    #[error("Unknown shape kind '{0}'")]
    UnknownShape(String),
}
